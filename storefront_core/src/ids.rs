use std::str::FromStr;


macro_rules! impl_transparent_display_for_newtype_struct {
    ($struct_type:ty) => {
        impl std::fmt::Display for $struct_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}


/// Marker trait for all integer-backed identifier newtypes
/// (e.g. [`CategoryId`], [`ProductId`]).
pub trait StorefrontIdNewtype: FromStr {}


macro_rules! create_integer_id_newtype {
    ($struct_name:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $struct_name(pub(crate) i64);

        impl $struct_name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl FromStr for $struct_name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let inner_id = <i64 as FromStr>::from_str(s)?;

                Ok(Self(inner_id))
            }
        }

        impl $crate::ids::StorefrontIdNewtype for $struct_name {}

        impl_transparent_display_for_newtype_struct!($struct_name);
    };
}



create_integer_id_newtype!(CategoryId);

create_integer_id_newtype!(ProductId);



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_and_displays_ids() {
        let category_id = CategoryId::from_str("42").unwrap();

        assert_eq!(category_id.into_inner(), 42);
        assert_eq!(category_id.to_string(), "42");

        assert!(ProductId::from_str("forty-two").is_err());
        assert!(ProductId::from_str("").is_err());
    }

    #[test]
    fn serializes_transparently() {
        let serialized = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(serialized, "7");

        let deserialized: CategoryId = serde_json::from_str("13").unwrap();
        assert_eq!(deserialized, CategoryId::new(13));
    }
}
