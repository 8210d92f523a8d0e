use spinning_cube::{AppConfig, app};

fn main() {
    if let Err(err) = app::run(AppConfig::default()) {
        log::error!("{err:#}");
        std::process::exit(-1);
    }
}
