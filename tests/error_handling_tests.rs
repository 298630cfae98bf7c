#[cfg(test)]
mod error_handling_tests {
    use contrato_server::config::{ConfigError, ServerConfig};
    use contrato_server::generators::{GeneratorError, InputRecord, PdfRenderEngine, RecordError};
    use contrato_server::ErrorResponse;
    use chrono::NaiveDate;

    #[test]
    fn test_error_response_codes() {
        let bad = ErrorResponse::bad_request("Dados não fornecidos");
        assert_eq!(bad.code, "BadRequest");
        assert_eq!(bad.error, "Dados não fornecidos");

        assert_eq!(ErrorResponse::method_not_allowed("x").code, "MethodNotAllowed");
        assert_eq!(ErrorResponse::internal_error("x").code, "InternalServerError");
        assert_eq!(ErrorResponse::payload_too_large("x").code, "PayloadTooLarge");
    }

    #[test]
    fn test_error_response_serializes_timestamp() {
        let value = serde_json::to_value(ErrorResponse::bad_request("Falta o corpo")).unwrap();
        assert_eq!(value["error"], "Falta o corpo");
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_record_errors_have_distinct_messages() {
        let empty = InputRecord::from_body(b"").unwrap_err();
        let malformed = InputRecord::from_body(b"{ malformed json ").unwrap_err();
        let not_object = InputRecord::from_body(b"\"texto\"").unwrap_err();

        assert!(matches!(empty, RecordError::Empty));
        assert_eq!(empty.to_string(), "Dados não fornecidos");
        assert!(malformed.to_string().starts_with("JSON inválido"));
        assert_eq!(not_object.to_string(), "Os dados devem ser um objeto JSON");
    }

    #[test]
    fn test_empty_block_sequence_is_render_error() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = PdfRenderEngine::default().render("Vazio", &[], "vazio", None, now);
        assert!(matches!(result, Err(GeneratorError::EmptyDocument)));
    }

    #[test]
    fn test_config_error_message_names_variable() {
        let err = ServerConfig::from_lookup(|name| (name == "PORT").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
        assert!(err.to_string().contains("PORT"));
    }
}
