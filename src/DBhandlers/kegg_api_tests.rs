#[cfg(test)]
mod tests {
    use crate::DBhandlers::kegg_api::{
        HttpClient, KEGG_REST_URL, KeggClient, KeggError, looks_like_kegg_id, parse_records,
    };
    use crate::Kinetics::reaction_parser::{Diagnostic, Reaction, parse_reactions};
    use std::cell::RefCell;
    use std::collections::HashMap;

    // Mock HTTP client for testing
    #[derive(Default)]
    struct MockHttpClient {
        responses: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl MockHttpClient {
        fn new() -> Self {
            Self::default()
        }

        fn mock_response(&mut self, url: &str, response: &str) {
            self.responses.insert(url.to_string(), response.to_string());
        }
    }

    impl HttpClient for MockHttpClient {
        fn get_text(&self, url: &str) -> Result<String, KeggError> {
            self.requested.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or(KeggError::Status(500))
        }
    }

    #[test]
    fn test_url_construction() {
        let kegg = KeggClient::new(KEGG_REST_URL);
        let url = kegg.construct_url("C00031").unwrap();
        assert_eq!(url.as_str(), "https://rest.kegg.jp/find/reaction/C00031");

        let kegg = KeggClient::with_client(MockHttpClient::new(), "https://rest.kegg.jp/");
        let url = kegg.construct_url(" C00031 ").unwrap();
        assert_eq!(url.as_str(), "https://rest.kegg.jp/find/reaction/C00031");

        assert!(matches!(
            kegg.construct_url("   "),
            Err(KeggError::EmptyQuery)
        ));
    }

    #[test]
    fn test_free_text_is_escaped() {
        let kegg = KeggClient::new(KEGG_REST_URL);
        let url = kegg.construct_url("alpha D-glucose").unwrap();
        assert_eq!(
            url.as_str(),
            "https://rest.kegg.jp/find/reaction/alpha%20D-glucose"
        );
    }

    #[test]
    fn test_bad_base_url() {
        let kegg = KeggClient::with_client(MockHttpClient::new(), "not a url");
        assert!(matches!(
            kegg.construct_url("C00031"),
            Err(KeggError::UrlError(_))
        ));
    }

    #[test]
    fn test_kegg_id_pattern() {
        assert!(looks_like_kegg_id("C00031"));
        assert!(looks_like_kegg_id("cpd:C00031"));
        assert!(looks_like_kegg_id("D00001"));
        assert!(!looks_like_kegg_id("glucose"));
        assert!(!looks_like_kegg_id("C0003"));
    }

    #[test]
    fn test_parse_records_skips_lines_without_tab() {
        let fetched = parse_records("R00001\tA + B <=> C\nno tab here\n\nR00002\tC <=> D\n");
        assert_eq!(
            fetched.reactions,
            vec![
                Reaction::new("R00001", "A + B <=> C"),
                Reaction::new("R00002", "C <=> D"),
            ]
        );
        assert_eq!(
            fetched.skipped,
            vec![Diagnostic::MalformedRecord {
                line: "no tab here".to_string()
            }]
        );
    }

    #[test]
    fn test_description_keeps_later_tabs() {
        let fetched = parse_records("rn:R00299\tATP:D-glucose\tC00002 <=> C00008");
        assert_eq!(fetched.reactions[0].id, "rn:R00299");
        assert_eq!(fetched.reactions[0].description, "ATP:D-glucose\tC00002 <=> C00008");
    }

    #[test]
    fn test_end_to_end_records_and_reactions() {
        let mut mock = MockHttpClient::new();
        mock.mock_response(
            "https://rest.kegg.jp/find/reaction/C00031",
            "R00001\tC00031 + C00002 <=> C00003\nR00002\tmalformed_line",
        );
        let kegg = KeggClient::with_client(mock, KEGG_REST_URL);
        let fetched = kegg.fetch_reactions_for_molecule("C00031").unwrap();
        assert_eq!(fetched.reactions.len(), 2);
        assert!(fetched.skipped.is_empty());

        let batch = parse_reactions(&fetched.reactions);
        assert_eq!(batch.reactions.len(), 1);
        assert_eq!(batch.reactions[0].id(), "R00001");
        assert_eq!(batch.diagnostics.len(), 1);
        assert!(batch.diagnostics[0].to_string().contains("malformed_line"));
    }

    #[test]
    fn test_empty_answer_is_empty_result() {
        let mut mock = MockHttpClient::new();
        mock.mock_response("https://rest.kegg.jp/find/reaction/C99999", "\n");
        let kegg = KeggClient::with_client(mock, KEGG_REST_URL);
        let fetched = kegg.fetch_reactions_for_molecule("C99999").unwrap();
        assert!(fetched.is_empty());
        assert!(fetched.skipped.is_empty());
    }

    #[test]
    fn test_transport_error_propagates() {
        let kegg = KeggClient::with_client(MockHttpClient::new(), KEGG_REST_URL);
        let result = kegg.fetch_reactions_for_molecule("C00031");
        assert!(matches!(result, Err(KeggError::Status(500))));
    }

    #[test]
    fn test_reactions_table() {
        let fetched = parse_records("R00001\tA <=> B\nR00002\tB <=> C");
        let table = fetched.reactions_table();
        assert_eq!(table.len(), 3);
        let text = table.to_string();
        assert!(text.contains("Reaction ID"));
        assert!(text.contains("R00002"));
    }
}
