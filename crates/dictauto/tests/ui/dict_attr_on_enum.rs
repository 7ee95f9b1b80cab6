use dictauto::Dict;

#[derive(Dict)]
enum Status {
    #[dict(kind = "status")]
    Active,
    Disabled,
}

fn main() {}
