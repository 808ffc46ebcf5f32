use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("Invalid input type: expected text or UTF-8 bytes, got {found}")]
    InvalidInputType { found: String },

    #[error("Encoding error: input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Encoding { valid_up_to: usize },

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Decomposition cancelled")]
    Cancelled,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::str::Utf8Error> for DictError {
    fn from(err: std::str::Utf8Error) -> Self {
        DictError::Encoding {
            valid_up_to: err.valid_up_to(),
        }
    }
}

impl From<std::string::FromUtf8Error> for DictError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        err.utf8_error().into()
    }
}

pub type DictResult<T> = Result<T, DictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        let err = DictError::InvalidInputType {
            found: "number".into(),
        };
        assert!(err.to_string().contains("number"));

        let err = DictError::Encoding { valid_up_to: 3 };
        assert!(err.to_string().contains("byte 3"));

        let err = DictError::Config("no terminators".into());
        assert_eq!(err.to_string(), "Config error: no terminators");

        assert_eq!(DictError::Cancelled.to_string(), "Decomposition cancelled");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DictError>();
    }

    #[test]
    fn utf8_error_converts() {
        let bytes = vec![b'o', b'k', 0xff];
        let utf8_err = std::str::from_utf8(&bytes).unwrap_err();
        let err: DictError = utf8_err.into();
        assert!(matches!(err, DictError::Encoding { valid_up_to: 2 }));

        let err: DictError = String::from_utf8(bytes).unwrap_err().into();
        assert!(matches!(err, DictError::Encoding { valid_up_to: 2 }));
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: DictError = json_err.into();
        assert!(matches!(err, DictError::Serialization(_)));
    }
}
