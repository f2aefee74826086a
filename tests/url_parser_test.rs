#[cfg(test)]
mod tests {
    use anyhow::Result;
    use std::sync::Arc;
    use urlcanon::url_parser::url_validator::SENTINEL_SCHEME;
    use urlcanon::{
        normalize, normalize_bytes, parse, query_pairs, ComponentSelector, NoopPassthrough,
        NormalizeCache, NormalizeError, Normalized, UrlNormalizer,
    };

    #[test]
    fn test_basic_url_parsing() -> Result<()> {
        let parts = parse("https://example.com/path?query=value");

        assert_eq!(parts.scheme.as_deref(), Some("https"));
        assert_eq!(parts.host.as_deref(), Some("example.com"));
        assert_eq!(parts.port, None);
        assert_eq!(parts.path.as_deref(), Some("/path"));
        assert_eq!(parts.query.as_deref(), Some("query=value"));
        assert_eq!(parts.fragment, None);

        Ok(())
    }

    #[test]
    fn test_host_is_lowercased_and_trimmed() -> Result<()> {
        let parts = parse("HTTPS://WWW.Example.COM./");
        assert_eq!(parts.scheme.as_deref(), Some("https"));
        assert_eq!(parts.host.as_deref(), Some("www.example.com"));

        let host = normalize("  .Example.org..  ", ComponentSelector::Host)?;
        assert_eq!(host.into_component().unwrap(), "example.org");

        Ok(())
    }

    #[test]
    fn test_scheme_less_input() -> Result<()> {
        let parts = parse("example.com/a/b?c=d");
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.host.as_deref(), Some("example.com"));
        assert_eq!(parts.path.as_deref(), Some("/a/b"));
        assert_eq!(parts.query.as_deref(), Some("c=d"));

        assert_eq!(normalize("example.com/a/b", ComponentSelector::Scheme)?.into_component(), None);

        Ok(())
    }

    #[test]
    fn test_ipv6_hosts() -> Result<()> {
        let parts = parse("[::1]:8080/status");
        assert_eq!(parts.host.as_deref(), Some("[::1]"));
        assert_eq!(parts.port, Some(8080));
        assert_eq!(parts.path.as_deref(), Some("/status"));

        let bare = parse("2001:DB8::1");
        assert_eq!(bare.host.as_deref(), Some("[2001:db8::1]"));
        assert_eq!(bare.port, None);

        let reparsed = parse(&parts.to_url_string());
        assert_eq!(reparsed, parts);

        Ok(())
    }

    #[test]
    fn test_encoded_space_in_path() -> Result<()> {
        let path = normalize("http://h.test/a%20b", ComponentSelector::Path)?;
        assert_eq!(path.into_component().unwrap(), "/a+b");

        Ok(())
    }

    #[test]
    fn test_normalization_is_idempotent() -> Result<()> {
        let inputs = [
            "HTTP://User:Pw@Example.COM:80/a%20b?q=1#frag",
            "example.com/a/b",
            "//cdn.Example.net/lib.js",
            "[::1]:8080/status",
            "localhost:3000",
            "mailto:someone@example.com",
            "%2F%2Fhost/x",
            "http://a%2540b.com/x",
            "a%40b:c@h.test/p%3Fq?r=%23s",
            "mailto:%2F%2Fx",
            "http://h.test/100%25?a=%2541#%2523",
        ];

        for raw in inputs {
            let first = parse(raw);
            let second = parse(&first.to_url_string());
            assert_eq!(first, second, "not idempotent for {:?}", raw);
            assert_eq!(first.scheme, second.scheme);
            assert_eq!(first.host, second.host);
        }

        Ok(())
    }

    #[test]
    fn test_sentinel_never_leaks() -> Result<()> {
        let inputs = [
            "example.com",
            "host.test:81/x",
            "",
            "?only=query",
            "#only-fragment",
            "x-urlcanon-sentinel://h.test/",
        ];

        for raw in inputs {
            let parts = parse(raw);
            assert_ne!(parts.scheme.as_deref(), Some(SENTINEL_SCHEME));
            assert!(!parts.to_url_string().contains(SENTINEL_SCHEME));

            let scheme = normalize(raw, ComponentSelector::Scheme)?.into_component();
            assert!(scheme.map_or(true, |s| s != SENTINEL_SCHEME));
        }

        Ok(())
    }

    #[test]
    fn test_invalid_selectors() -> Result<()> {
        for raw in ["", "   ", "example.com"] {
            for code in [8, -2, 100, i32::MIN] {
                assert!(
                    matches!(normalize(raw, code), Err(NormalizeError::InvalidArgument(_))),
                    "code {} accepted for {:?}",
                    code,
                    raw
                );
            }
            for name in ["", "bogus", "hostname"] {
                assert!(
                    matches!(normalize(raw, name), Err(NormalizeError::InvalidArgument(_))),
                    "name {:?} accepted for {:?}",
                    name,
                    raw
                );
            }
            assert!(normalize_bytes(raw.as_bytes(), 8).is_err());
        }

        Ok(())
    }

    #[test]
    fn test_every_selector_matches_the_full_set() -> Result<()> {
        let raw = "https://u:p@Host.test:8443/x%2Fy?a=1#f";
        let all = parse(raw);

        for selector in ComponentSelector::ALL_COMPONENTS {
            let single = normalize(raw, selector)?.into_component();
            assert_eq!(single, all.get(selector), "mismatch for {}", selector);
        }

        Ok(())
    }

    #[test]
    fn test_query_pairs_from_normalized_query() -> Result<()> {
        let query = normalize("https://h.test/?name=John%20Smith&tag=a&tag=b", "query")?
            .into_component()
            .unwrap();
        let pairs = query_pairs(query.as_str().unwrap());

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("name".to_string(), "John Smith".to_string()));
        assert_eq!(pairs[2], ("tag".to_string(), "b".to_string()));

        Ok(())
    }

    #[test]
    fn test_cache_returns_same_results() -> Result<()> {
        let normalizer = UrlNormalizer::new().with_idn(Arc::new(NoopPassthrough));
        let cache = NormalizeCache::with_capacity(normalizer.clone(), 2);

        for raw in ["a.test/1", "b.test/2", "c.test/3", "a.test/1"] {
            let cached = cache.get_or_normalize(raw, ComponentSelector::All)?;
            assert_eq!(cached, normalizer.normalize(raw, ComponentSelector::All)?);
        }
        assert_eq!(cache.len(), 2);

        Ok(())
    }

    #[test]
    fn test_malformed_input_never_fails() -> Result<()> {
        let inputs = [
            "http://",
            ":::",
            "[",
            "%",
            "http://[::1",
            "http://host:99999999/",
            "\u{0}\u{1}",
            "https://%ZZ%E0/",
        ];

        for raw in inputs {
            assert!(matches!(normalize(raw, -1)?, Normalized::All(_)));
        }

        Ok(())
    }
}
