//! Helper macro for generating domain port error enums.
//!
//! Every driven port reports failures through its own small error enum so
//! services can map them to domain errors without a shared catch-all type.
//! The macro keeps the enums uniform: a `thiserror` display message per
//! variant and a snake_case constructor that converts its argument.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : $ty:ty } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: $ty },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!(
                        "Build [`", stringify!($name), "::", stringify!($variant),
                        "`], converting the argument."
                    )]
                    pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StubStoreError {
            Connection { message: String } => "connection failed: {message}",
            UniqueViolation { constraint: String } => "unique constraint violated: {constraint}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StubStoreError::connection("pool exhausted");
        assert_eq!(err.to_string(), "connection failed: pool exhausted");
    }

    #[test]
    fn variants_format_their_field() {
        let err = StubStoreError::unique_violation("lunchbreak_group_date");
        assert_eq!(
            err.to_string(),
            "unique constraint violated: lunchbreak_group_date"
        );
    }
}
