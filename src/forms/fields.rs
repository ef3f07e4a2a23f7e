//! Field enum declaration helper shared by the entity schemas.

/// Declares a field enum and implements [`FormField`](crate::utils::validate::FormField)
/// for it from `Variant => ("wire_name", "Label")` pairs.
macro_rules! define_form_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $crate::utils::validate::FormField for $name {
            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant,)*]
            }
        }
    };
}

pub(crate) use define_form_fields;
