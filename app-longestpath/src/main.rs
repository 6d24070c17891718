use app_longestpath::LongestPath;

fn main() -> common::Result<()> {
    common::run::<LongestPath>()
}
