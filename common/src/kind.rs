//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Generated enums are [`Copy`], hashable, ordered by declaration and
/// convertible from/to their `snake_case` names.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Payment mode."]
///     enum PaymentMode {
///         #[doc = "Paid upfront."]
///         PayNow = 1,
///
///         #[doc = "Paid on the visit."]
///         PayLater = 2,
///     }
/// }
///
/// assert_eq!(PaymentMode::PayLater.to_string(), "pay_later");
/// assert_eq!("pay_now".parse::<PaymentMode>().ok(), Some(PaymentMode::PayNow));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants in their declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
