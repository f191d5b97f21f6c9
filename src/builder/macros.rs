//! Macros for ergonomic machine construction.

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// Each variant is named after itself, and serializes as that name. The
/// expansion reaches serde through this crate, so callers need no serde
/// dependency of their own.
///
/// # Example
///
/// ```
/// use fsm_runtime::core::State;
/// use fsm_runtime::state_enum;
///
/// state_enum! {
///     pub enum CoffeeState {
///         Open,
///         ReadyToBuy,
///         PoweredOff,
///     }
/// }
///
/// assert_eq!(CoffeeState::ReadyToBuy.name(), "ReadyToBuy");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        // Encoded by variant name.
        impl $crate::serde::Serialize for $name {
            fn serialize<__S>(&self, serializer: __S) -> ::std::result::Result<__S::Ok, __S::Error>
            where
                __S: $crate::serde::Serializer,
            {
                serializer.serialize_str($crate::core::State::name(self))
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<__D>(deserializer: __D) -> ::std::result::Result<Self, __D::Error>
            where
                __D: $crate::serde::Deserializer<'de>,
            {
                let name = <::std::string::String as $crate::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                $(
                    if name == stringify!($variant) {
                        return ::std::result::Result::Ok(Self::$variant);
                    }
                )*
                const VARIANTS: &[&str] = &[$(stringify!($variant)),*];
                ::std::result::Result::Err(
                    <__D::Error as $crate::serde::de::Error>::unknown_variant(&name, VARIANTS),
                )
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.to_string(), "Complete");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            /// Documented states.
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_ne!(PublicState::A, PublicState::B);
    }

    #[test]
    fn state_enum_serializes_by_name() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");

        let decoded: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, TestState::Processing);

        let bytes = bincode::serialize(&TestState::Complete).unwrap();
        let decoded: TestState = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, TestState::Complete);
    }

    mod shadowed {
        // Not the serde crate.
        mod serde {}

        state_enum! {
            pub enum Switch {
                On,
                Off,
            }
        }
    }

    #[test]
    fn state_enum_ignores_caller_serde_path() {
        let json = serde_json::to_string(&shadowed::Switch::Off).unwrap();
        assert_eq!(json, "\"Off\"");
        assert_eq!(shadowed::Switch::On.name(), "On");
    }

    #[test]
    fn state_enum_rejects_unknown_name() {
        let error = serde_json::from_str::<TestState>("\"Paused\"").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("Paused"));
        assert!(message.contains("Initial"));
    }
}
