use gradecalc_core::error::Result;

fn main() -> Result<()> {
    gradecalc::application::run()
}
