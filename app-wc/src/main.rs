use app_wc::WordCount;

fn main() -> common::Result<()> {
    common::run::<WordCount>()
}
