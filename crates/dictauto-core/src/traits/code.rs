///
/// DictCode
///
/// String form of a coded value, as compared against lookup keys.
/// `None` means the field holds no code and nothing is resolved.
///

pub trait DictCode {
    fn dict_code(&self) -> Option<String>;
}

impl DictCode for str {
    fn dict_code(&self) -> Option<String> {
        let code = self.trim();

        (!code.is_empty()).then(|| code.to_string())
    }
}

impl DictCode for String {
    fn dict_code(&self) -> Option<String> {
        self.as_str().dict_code()
    }
}

impl<T: DictCode + ?Sized> DictCode for &T {
    fn dict_code(&self) -> Option<String> {
        (**self).dict_code()
    }
}

impl<T: DictCode + ?Sized> DictCode for Box<T> {
    fn dict_code(&self) -> Option<String> {
        (**self).dict_code()
    }
}

impl<T: DictCode> DictCode for Option<T> {
    fn dict_code(&self) -> Option<String> {
        self.as_ref().and_then(DictCode::dict_code)
    }
}

impl_code_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);

///
/// TESTS
///
