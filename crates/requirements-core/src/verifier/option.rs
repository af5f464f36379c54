//! Null checks on optional values.

use crate::errors::{ExceptionKind, Result};
use crate::message::builder::ACTUAL;
use crate::message::Describe;

use super::Verifier;

impl<T: Describe> Verifier<Option<T>> {
    /// # Errors
    ///
    /// `InvalidArgument` if the value is present.
    pub fn is_null(self) -> Result<Self> {
        self.verify(Option::is_none, |v| {
            v.failure(
                "is_null",
                ExceptionKind::InvalidArgument,
                format!("{} must be null.", v.quoted_name()),
            )
            .add_context(ACTUAL, v.value())
            .build()
        })
    }
}

impl<T> Verifier<Option<T>> {
    /// Require a value and continue with it unwrapped
    ///
    /// ```
    /// use requirements_core::require_that;
    ///
    /// let port: Option<u16> = Some(8080);
    /// let port = require_that(port, "port")?.is_not_null()?.is_positive()?.into_value();
    /// assert_eq!(port, 8080);
    /// # Ok::<(), requirements_core::VerificationError>(())
    /// ```
    ///
    /// A disabled verifier has nothing to unwrap when the value is absent,
    /// so this fails even when assertions are off.
    ///
    /// # Errors
    ///
    /// `NullReference` if the value is absent.
    pub fn is_not_null(self) -> Result<Verifier<T>> {
        let Verifier {
            value,
            name,
            config,
            enabled,
        } = self;
        match value {
            Some(value) => Ok(Verifier::new(value, name, config, enabled)),
            None => {
                let absent: Verifier<Option<T>> = Verifier::new(None, name, config, enabled);
                Err(absent
                    .failure(
                        "is_not_null",
                        ExceptionKind::NullReference,
                        format!("{} may not be null.", absent.quoted_name()),
                    )
                    .build())
            }
        }
    }
}
