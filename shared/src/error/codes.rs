//! Error codes
//!
//! One table drives the enum, its numeric wire value, the HTTP status and the
//! default message. Ranges group codes by area:
//!
//! | Range | Area |
//! |-------|------|
//! | 0xxx | request / validation |
//! | 1xxx | lock gate |
//! | 2xxx | members |
//! | 3xxx | settings |
//! | 4xxx | images |
//! | 9xxx | system |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $name:ident = $value:literal, $status:ident, $msg:literal; )*) => {
        /// Numeric error code sent to the dashboard as `code`
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$doc])* $name = $value, )*
        }

        impl ErrorCode {
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name),*];

            /// Default message shown inline by the dashboard
            pub const fn message(&self) -> &'static str {
                match self {
                    $( ErrorCode::$name => $msg, )*
                }
            }

            pub fn http_status(&self) -> StatusCode {
                match self {
                    $( ErrorCode::$name => StatusCode::$status, )*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(ErrorCode::$name), )*
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    ValidationFailed = 2, BAD_REQUEST, "Validation failed";
    NotFound = 3, NOT_FOUND, "Resource not found";
    InvalidRequest = 5, BAD_REQUEST, "Invalid request";
    RequiredField = 7, BAD_REQUEST, "Required field is missing";

    /// API call while the dashboard is locked
    NotAuthenticated = 1001, UNAUTHORIZED, "Dashboard is locked";
    InvalidCredentials = 1002, UNAUTHORIZED, "Incorrect password";
    /// Current password wrong on password change
    PasswordMismatch = 1003, BAD_REQUEST, "Current password is incorrect";
    PasswordTooShort = 1004, BAD_REQUEST, "Password must be at least 4 characters";

    MemberNotFound = 2001, NOT_FOUND, "No member with this number";
    MemberImageRequired = 2002, BAD_REQUEST, "Member image is required";
    MemberAlreadyPresent = 2003, BAD_REQUEST, "Member is already checked in";

    InvalidTimeFormat = 3001, BAD_REQUEST, "Time must be in HH:MM format";

    ImageProcessingFailed = 4001, UNPROCESSABLE_ENTITY, "Image processing failed";
    InvalidImageFile = 4002, UNPROCESSABLE_ENTITY, "Invalid image file";
    EmptyCropRegion = 4003, UNPROCESSABLE_ENTITY, "Crop region is empty";

    InternalError = 9001, INTERNAL_SERVER_ERROR, "Internal server error";
    /// Member or settings store failure
    DatabaseError = 9002, INTERNAL_SERVER_ERROR, "Database error";
    /// Lock gate local store failure
    LocalStorageError = 9003, INTERNAL_SERVER_ERROR, "Local storage error";
}

impl ErrorCode {
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// 9xxx codes are logged when they reach the HTTP boundary
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
