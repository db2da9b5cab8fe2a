use std::convert::Infallible;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use chrono::prelude::*;
use marey_schedule::time::{Duration, Time, TimeParseError};
use serde::Deserialize;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::draw::marey::DEFAULT_TIMELINE_TIME;
use crate::views::LinkedViews;

/// Before this hour of the wall clock it is still the previous service day
const SERVICE_DAY_START_HOUR: u32 = 5;

/// The time a map is asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeFilter {
    Now,
    At(Time),
}

impl TimeFilter {
    pub fn resolve(self) -> Time {
        match self {
            TimeFilter::Now => service_time(Utc::now()),
            TimeFilter::At(time) => time,
        }
    }
}

impl FromStr for TimeFilter {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "now" {
            Ok(Self::Now)
        } else {
            s.parse().map(Self::At)
        }
    }
}

/// The Dutch wall clock as a time of the service day, which runs on past midnight
fn service_time(date_time: DateTime<Utc>) -> Time {
    let date_time = date_time.with_timezone(&chrono_tz::Europe::Amsterdam);
    let time = Time::from_hms(date_time.hour(), date_time.minute(), date_time.second());
    if date_time.hour() < SERVICE_DAY_START_HOUR {
        time + Duration::minutes(24 * 60)
    } else {
        time
    }
}

#[derive(Debug)]
struct InvalidTime(TimeParseError);

impl warp::reject::Reject for InvalidTime {}

#[derive(Debug)]
struct RenderFailed;

impl warp::reject::Reject for RenderFailed {}

#[derive(Debug, Deserialize)]
struct MapQuery {
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CursorQuery {
    y: f64,
}

fn with_data<D: Sync + Send>(
    data: Arc<D>,
) -> impl Filter<Extract = (Arc<D>,), Error = Infallible> + Clone {
    warp::any().map(move || data.clone())
}

fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Result<String, Rejection> {
    let mut out = Vec::new();
    match write(&mut out) {
        Ok(()) => Ok(String::from_utf8_lossy(&out).into_owned()),
        Err(err) => {
            error!("Rendering failed: {}", err);
            Err(warp::reject::custom(RenderFailed))
        }
    }
}

fn svg(body: String) -> impl Reply {
    warp::reply::with_header(body, "content-type", "image/svg+xml")
}

async fn page_handler(views: Arc<LinkedViews>) -> Result<impl Reply, Rejection> {
    render(|w| views.write_page_to(w)).map(warp::reply::html)
}

async fn marey_handler(views: Arc<LinkedViews>) -> Result<impl Reply, Rejection> {
    render(|w| views.write_marey_to(w)).map(svg)
}

async fn map_handler(query: MapQuery, views: Arc<LinkedViews>) -> Result<impl Reply, Rejection> {
    let time = match query.time {
        Some(time) => time
            .parse::<TimeFilter>()
            .map_err(|err| warp::reject::custom(InvalidTime(err)))?
            .resolve(),
        None => DEFAULT_TIMELINE_TIME,
    };
    render(|w| views.write_map_to(w, time)).map(svg)
}

async fn cursor_handler(query: CursorQuery, views: Arc<LinkedViews>) -> Result<impl Reply, Rejection> {
    match views.seek(query.y) {
        Ok(update) => Ok(warp::reply::json(&update)),
        Err(err) => {
            error!("Cursor update failed: {}", err);
            Err(warp::reject::custom(RenderFailed))
        }
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(InvalidTime(parse_error)) = err.find::<InvalidTime>() {
        Ok(warp::reply::with_status(
            parse_error.to_string(),
            StatusCode::BAD_REQUEST,
        ))
    } else if err.find::<RenderFailed>().is_some() {
        Ok(warp::reply::with_status(
            "rendering failed".to_owned(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else {
        Err(err)
    }
}

/// `/` the page, `/marey.svg` the diagram, `/map.svg?time=` the map at a time and `/cursor?y=`
/// the cursor following the pointer
pub fn routes(
    views: Arc<LinkedViews>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let page = warp::path::end()
        .and(with_data(views.clone()))
        .and_then(page_handler);
    let marey = warp::path!("marey.svg")
        .and(with_data(views.clone()))
        .and_then(marey_handler);
    let map = warp::path!("map.svg")
        .and(warp::query::<MapQuery>())
        .and(with_data(views.clone()))
        .and_then(map_handler);
    let cursor = warp::path!("cursor")
        .and(warp::query::<CursorQuery>())
        .and(with_data(views))
        .and_then(cursor_handler);
    warp::get()
        .and(page.or(marey).or(map).or(cursor))
        .recover(handle_rejection)
        .with(warp::trace::request())
}

pub async fn serve(views: Arc<LinkedViews>, port: u16) {
    info!("Starting web server on port {}", port);
    warp::serve(routes(views)).run(([127, 0, 0, 1], port)).await;
}
