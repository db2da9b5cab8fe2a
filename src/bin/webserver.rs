use std::sync::Arc;

use tracing::error;
use transit_marey::config::Config;
use transit_marey::{data, logger, server, LinkedViews};

#[tokio::main]
async fn main() {
    logger::init_logger();

    match load() {
        Ok((config, views)) => server::serve(views, config.port).await,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}

fn load() -> transit_marey::Result<(Config, Arc<LinkedViews>)> {
    let config = Config::from_env()?;
    let timetable = data::load_timetable(&config.data_dir)?;
    let views = Arc::new(LinkedViews::new(timetable, &config.layout));
    Ok((config, views))
}
