// impl_base
/// Mark types as traversal leaves: the walker never looks inside them.
#[macro_export]
macro_rules! impl_base {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::traits::Visitable for $ty {}
        )*
    };
}

// impl_code_display
// DictCode through `ToString` for types that are never empty.
macro_rules! impl_code_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::traits::DictCode for $ty {
                fn dict_code(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}
