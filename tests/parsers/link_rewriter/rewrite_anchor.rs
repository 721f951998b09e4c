//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use extlinks::config::Attributes;
    use extlinks::parsers::html::{
        find_nodes, get_fragment_root, html_to_fragment, serialize_fragment,
    };
    use extlinks::parsers::link_rewriter::rewrite_anchor;

    fn rewrite_first_anchor(html: &str, attributes: &Attributes, ignore_case: bool) -> (String, usize) {
        let dom = html_to_fragment(html).unwrap();
        let anchor = find_nodes(&get_fragment_root(&dom).unwrap(), "a").remove(0);
        let set = rewrite_anchor(&anchor, attributes, ignore_case);

        (serialize_fragment(&dom).unwrap(), set)
    }

    #[test]
    fn sets_missing_attributes() {
        let attributes = Attributes::from_iter([("rel", "nofollow"), ("target", "_blank")]);

        assert_eq!(
            rewrite_first_anchor(r#"<a href="http://a.com">a</a>"#, &attributes, false),
            (
                r#"<a href="http://a.com" rel="nofollow" target="_blank">a</a>"#.to_string(),
                2
            )
        );
    }

    #[test]
    fn keeps_non_empty_values() {
        let attributes = Attributes::from_iter([("rel", "nofollow"), ("target", "_blank")]);

        assert_eq!(
            rewrite_first_anchor(
                r#"<a href="http://a.com" rel="dofollow" target="">a</a>"#,
                &attributes,
                false
            ),
            (
                r#"<a href="http://a.com" rel="dofollow" target="_blank">a</a>"#.to_string(),
                1
            )
        );
    }

    #[test]
    fn attributes_do_not_see_each_other() {
        // Both names fold to "rel": each sees the element as it was before the call.
        let attributes = Attributes::from_iter([("rel", "nofollow"), ("REL", "noopener")]);

        assert_eq!(
            rewrite_first_anchor(r#"<a href="http://a.com" rel="">a</a>"#, &attributes, true),
            (
                r#"<a href="http://a.com" rel="noopener">a</a>"#.to_string(),
                2
            )
        );
    }

    #[test]
    fn nothing_to_do() {
        let attributes = Attributes::from_iter([("rel", "me")]);

        assert_eq!(
            rewrite_first_anchor(r#"<a href="http://a.com" rel="me">a</a>"#, &attributes, false),
            (r#"<a href="http://a.com" rel="me">a</a>"#.to_string(), 0)
        );
    }

    #[test]
    fn empty_attribute_set() {
        assert_eq!(
            rewrite_first_anchor(r#"<a href="http://a.com">a</a>"#, &Attributes::new(), false),
            (r#"<a href="http://a.com">a</a>"#.to_string(), 0)
        );
    }
}
