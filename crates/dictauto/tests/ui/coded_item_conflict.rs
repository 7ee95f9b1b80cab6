use dictauto::{Dict, item::DictItem};

#[derive(Dict)]
struct Profile {
    #[dict(kind = "role", item)]
    role: Option<DictItem>,
}

fn main() {}
