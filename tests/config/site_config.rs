//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use extlinks::config::{Attributes, SiteConfig};

    #[test]
    fn reads_extlinks_section() {
        let site = SiteConfig::from_toml_str(
            r#"
            title = "My site"

            [extlinks]
            attributes = { rel = "nofollow", target = "_blank" }
            exclude = ["host3.com"]
            "#,
        )
        .unwrap();
        let config = site.extlinks().unwrap();

        assert_eq!(
            config.attributes,
            Some(Attributes::from_iter([("rel", "nofollow"), ("target", "_blank")]))
        );
        assert_eq!(config.exclude, vec!["host3.com"]);
        assert!(site.section("title").is_some());
    }

    #[test]
    fn missing_section_is_empty() {
        let site = SiteConfig::from_toml_str(r#"title = "My site""#).unwrap();

        assert!(site.section("extlinks").is_none());
        assert!(site.extlinks().unwrap().is_noop());
    }

    #[test]
    fn from_file() {
        let site = SiteConfig::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/_data_/site.toml"
        ))
        .unwrap();
        let config = site.extlinks().unwrap();

        assert_eq!(config.attributes.unwrap().get("target"), Some("_blank"));
        assert_eq!(config.exclude, vec!["host3.com"]);
    }

    #[test]
    fn from_table() {
        let mut table = toml::Table::new();
        table.insert("extlinks".to_string(), toml::Value::Table(
            r#"attributes = { rel = "nofollow" }"#.parse().unwrap(),
        ));
        let site = SiteConfig::from(table);

        assert_eq!(
            site.extlinks().unwrap().attributes.unwrap().get("rel"),
            Some("nofollow")
        );
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use extlinks::config::SiteConfig;
    use extlinks::ExtLinksError;

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            SiteConfig::from_toml_str("[extlinks\nattributes = "),
            Err(ExtLinksError::Config(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            SiteConfig::from_file(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/tests/_data_/does-not-exist.toml"
            )),
            Err(ExtLinksError::Io(_))
        ));
    }

    #[test]
    fn section_is_not_a_table() {
        let site = SiteConfig::from_toml_str(r#"extlinks = "nofollow""#).unwrap();

        assert!(matches!(site.extlinks(), Err(ExtLinksError::Config(_))));
    }
}
