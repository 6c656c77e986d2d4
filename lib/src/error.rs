use std::{fmt, io};
use std::panic::Location;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error carrying a chain of causes and arbitrary key/value context,
/// tracking the location it was constructed at. Build one with the `error!`
/// macro or via `From` on anything implementing [`ErrorDetail`].
#[derive(Debug)]
pub struct Error {
    detail: Box<dyn ErrorDetail>,
    prev: Option<Box<Error>>,
    _location: &'static Location<'static>,
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    pub fn chain(self, mut other: Error) -> Self {
        #[inline]
        fn _chain(error: Error, behind: &mut Error) {
            if let Some(prev) = behind.prev.as_mut() {
                _chain(error, prev);
            } else {
                behind.prev = Some(Box::new(error));
            }
        }

        _chain(self, &mut other);
        other
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($T:ty) => {
        impl $crate::error::ErrorDetail for $T {
            fn context(&self) -> Vec<(Option<String>, String)> {
                let mut ctxt = vec![];
                let mut error = std::error::Error::source(self);
                while let Some(e) = error {
                    ctxt.push((None, e.to_string()));
                    error = e.source();
                }

                ctxt
            }
        }
    }
}

impl_error_detail_with_std_error!(io::Error);
impl_error_detail_with_std_error!(serde_json::Error);
impl_error_detail_with_std_error!(minijinja::Error);
impl_error_detail_with_std_error!(image::ImageError);

impl ErrorDetail for String { }
impl ErrorDetail for &str { }

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            prev: None,
            detail: Box::new(detail),
            _location: std::panic::Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn nested(error: &Error, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let indent = "    ".repeat(depth);
            let indent_line = format!("\n{indent}");

            writeln!(f, "{indent}{}", format!("{:#}", error.detail).replace('\n', &indent_line))?;
            if let Some(prev) = &error.prev {
                nested(prev, depth + 1, f)?;
            }

            for (key, value) in error.detail.context() {
                let value = value.replace('\n', &indent_line);
                match key {
                    Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                    None => writeln!(f, "{indent}{value}")?,
                }
            }

            if std::env::var_os("RUST_BACKTRACE").is_some() {
                writeln!(f, "{indent}[{}]", error._location)?;
            }

            Ok(())
        }

        nested(self, 0, f)
    }
}

#[derive(Debug)]
pub struct MakeshiftError {
    pub message: String,
    pub parameters: Vec<(Option<String>, String)>,
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr, $($rest:tt)*) => (
        $crate::error::Error::from($crate::error::MakeshiftError {
            message: $msg.to_string(),
            parameters: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $crate::error!(@param v $($rest)*);
                v
            },
        })
    );

    ($msg:expr) => ( $crate::error!($msg,) );

    (@param $v:ident $key:expr => $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $key => $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $key:expr => $value:expr) => {
        $v.push((Some($key.to_string()), $value.to_string()));
    };

    (@param $v:ident $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $value:expr) => {
        $v.push((None, $value.to_string()));
    };

    (@param $v:ident $(,)?) => { };
}

impl fmt::Display for MakeshiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl ErrorDetail for MakeshiftError {
    fn context(&self) -> Vec<(Option<String>, String)> {
        self.parameters.clone()
    }
}

pub trait Chainable<T> {
    fn chain(self, other: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, other: impl Into<Error>) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(other.into()))
        }
    }

    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>,
     {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(f().into()))
        }
    }
}

#[cfg(test)]
mod chain_tests {
    use super::*;

    #[test]
    fn test_context_renders() {
        let error = error! {
            "something failed",
            "path" => "/tmp/book.txt",
            "extra detail",
        };

        let rendered = error.to_string();
        assert!(rendered.contains("something failed"));
        assert!(rendered.contains("path: /tmp/book.txt"));
        assert!(rendered.contains("extra detail"));
    }

    #[test]
    fn test_chained_cause_renders() {
        let io = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let error = io.chain(error!("could not read input"));

        let rendered = error.to_string();
        assert!(rendered.contains("could not read input"));
        assert!(rendered.contains("gone"));
    }
}
