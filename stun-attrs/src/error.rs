//! STUN attribute errors.
//! This module contains all errors that can happen when encoding or decoding attributes.

use std::error;
use std::fmt;

/// Defines the type of error
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StunErrorType {
    /// The attribute type is not registered
    UnknownAttributeType,
    /// The attribute value does not match the encoding rule of its kind
    MalformedAttribute,
    /// The user name value lacks the `ufrag:password` separator or its
    /// user fragment can not be encoded
    MalformedUsername,
    /// Encoded or decoded value is bigger than the maximum allowed value
    ValueTooLong,
    /// Small buffer
    SmallBuffer,
}

impl fmt::Display for StunErrorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StunErrorType::UnknownAttributeType => write!(f, "unknown attribute type"),
            StunErrorType::MalformedAttribute => write!(f, "malformed attribute"),
            StunErrorType::MalformedUsername => write!(f, "malformed username"),
            StunErrorType::ValueTooLong => write!(f, "value is too long"),
            StunErrorType::SmallBuffer => write!(f, "small input buffer"),
        }
    }
}

/// Provides information about the error
#[derive(Debug)]
pub enum StunErrorInfo {
    /// A [`String`] describing the error,
    Text(String),
    /// Source of error
    Error(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for StunErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            StunErrorInfo::Text(msg) => write!(f, "{}", msg),
            StunErrorInfo::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Stun error
#[derive(Debug)]
pub struct StunError {
    /// Error type
    pub error_type: StunErrorType,
    /// Information about the error
    pub info: StunErrorInfo,
}

impl fmt::Display for StunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {}", self.error_type, self.info)
    }
}

impl error::Error for StunError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.info {
            StunErrorInfo::Text(_) => None,
            StunErrorInfo::Error(e) => Some(e.as_ref()),
        }
    }
}

impl PartialEq<StunError> for StunErrorType {
    fn eq(&self, other: &StunError) -> bool {
        *self == other.error_type
    }
}

impl PartialEq<StunErrorType> for StunError {
    fn eq(&self, other: &StunErrorType) -> bool {
        self.error_type == *other
    }
}

impl PartialEq for StunError {
    fn eq(&self, other: &Self) -> bool {
        // Two erros are equal if they have the same type
        self.error_type == other.error_type
    }
}

impl Eq for StunError {}

impl From<std::str::Utf8Error> for StunError {
    fn from(e: std::str::Utf8Error) -> Self {
        StunError::from_error(StunErrorType::MalformedAttribute, Box::new(e))
    }
}

impl StunError {
    pub(crate) fn new<S>(error_type: StunErrorType, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            error_type,
            info: StunErrorInfo::Text(msg.into()),
        }
    }

    pub(crate) fn from_error(
        error_type: StunErrorType,
        e: Box<dyn error::Error + Send + Sync>,
    ) -> Self {
        Self {
            error_type,
            info: StunErrorInfo::Error(e),
        }
    }
}
