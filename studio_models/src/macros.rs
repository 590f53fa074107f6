macro_rules! nutype_string {
    ($(#[doc=$doc:literal])* $ident:ident) => {
        $(#[doc=$doc])*
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            Deref,
            From,
            AsRef,
            Display,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
