/// Defines a newtype identifier around an integer scalar (typically `i64`).
///
/// The generated type derives the usual value traits plus serde support
/// (serialized transparently as the inner number) and an OpenAPI schema,
/// and implements `Display`, `FromStr` and conversions to and from the
/// inner type.
///
/// Usage:
///   define_id_type!(i64, PersonId);
#[macro_export]
macro_rules! define_id_type {
    ($inner:ty, $name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = <$inner as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                s.parse::<$inner>().map($name)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }
    };
}
