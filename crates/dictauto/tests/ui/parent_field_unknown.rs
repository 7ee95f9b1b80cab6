use dictauto::Dict;

#[derive(Dict)]
struct Address {
    #[dict(kind = "city", parent_field = "province")]
    city: String,
}

fn main() {}
