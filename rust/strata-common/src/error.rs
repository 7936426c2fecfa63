use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(name: impl Into<String>, index: usize, bound: usize) -> Error {
        Error(
            ErrorKind::OutOfRange {
                name: name.into(),
                index,
                bound,
            }
            .into(),
        )
    }

    pub fn bad_format(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::BadFormat {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn conversion(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Conversion {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("{name} out of range: index {index}, bound {bound}")]
    OutOfRange {
        name: String,
        index: usize,
        bound: usize,
    },

    #[error("bad format: {message}")]
    BadFormat { message: String },

    #[error("conversion failed for '{element}': {message}")]
    Conversion { element: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_roundtrip() {
        let err = Error::out_of_range("from", 12, 8);
        match err.kind() {
            ErrorKind::OutOfRange { index, bound, .. } => {
                assert_eq!(*index, 12);
                assert_eq!(*bound, 8);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::bad_format("integer value expected");
        assert_eq!(err.to_string(), "bad format: integer value expected");

        let err = Error::conversion("uuid", "invalid hex digit");
        assert_eq!(
            err.to_string(),
            "conversion failed for 'uuid': invalid hex digit"
        );
    }
}
