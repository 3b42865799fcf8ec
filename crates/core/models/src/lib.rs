#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

macro_rules! auto_derived {
    ( $( $item:item )+ ) => {
        $(
            #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
            #[derive(Debug, Clone, Eq, PartialEq)]
            $item
        )+
    };
}

pub mod v0;

/// Utility function to check if a boolean value is false
pub fn if_false(t: &bool) -> bool {
    !t
}
