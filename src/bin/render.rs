//! Writes `marey.svg` and `map.svg` into a directory, the map at the given time.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use marey_schedule::time::Time;
use structopt::StructOpt;
use tracing::{error, info};
use transit_marey::config::Config;
use transit_marey::draw::marey::DEFAULT_TIMELINE_TIME;
use transit_marey::{data, logger, Error, LinkedViews, Result};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "render",
    about = "Write the Marey diagram and the map at a time as SVG files."
)]
struct Options {
    /// directory the svg files are written to
    #[structopt(parse(from_os_str), default_value = ".")]
    out_dir: PathBuf,
    /// time of the service day shown on the map, as hh:mm:ss [default: 05:01:00]
    time: Option<Time>,
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_owned(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    write(&mut out).map_err(io_error)?;
    out.flush().map_err(io_error)
}

fn render(options: Options) -> Result<()> {
    let time = options.time.unwrap_or(DEFAULT_TIMELINE_TIME);
    let config = Config::from_env()?;
    let views = LinkedViews::new(data::load_timetable(&config.data_dir)?, &config.layout);

    let now = Instant::now();
    let marey_path = options.out_dir.join("marey.svg");
    write_file(&marey_path, |w| views.write_marey_to(w))?;
    let map_path = options.out_dir.join("map.svg");
    write_file(&map_path, |w| views.write_map_to(w, time))?;
    info!(
        "Wrote {} and {} at {} in {}ms",
        marey_path.display(),
        map_path.display(),
        time,
        now.elapsed().as_millis()
    );
    Ok(())
}

fn main() {
    let options = Options::from_args();
    logger::init_logger();
    if let Err(err) = render(options) {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use structopt::clap::ErrorKind;

    #[test]
    fn defaults_to_here_at_the_first_cursor_time() {
        let options = Options::from_iter_safe(&["render"]).unwrap();
        assert_eq!(options.out_dir, PathBuf::from("."));
        assert_eq!(options.time, None);
    }

    #[test]
    fn directory_and_time() {
        let options = Options::from_iter_safe(&["render", "out", "24:10:00"]).unwrap();
        assert_eq!(options.out_dir, PathBuf::from("out"));
        assert_eq!(options.time, Some(Time::from_hms(24, 10, 0)));
    }

    #[test]
    fn help_is_not_a_directory() {
        let err = Options::from_iter_safe(&["render", "--help"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HelpDisplayed);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        let err = Options::from_iter_safe(&["render", "out", "half past six"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueValidation);
        let err = Options::from_iter_safe(&["render", "out", "06:10:00", "extra"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownArgument);
    }
}
