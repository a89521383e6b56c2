//! Drives a simulated usage-report fetch through its lifecycle and renders
//! every observed state to a status line.

use sumstate_core::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
enum FetchError {
    #[error("network unreachable: {0}")]
    Network(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

#[derive(Clone, Debug)]
struct Usage {
    minutes_used: u32,
    minutes_quota: u32,
}

/// Pretend transport: even ticks succeed, odd ticks fail.
fn fake_fetch(tick: u32) -> Result<Usage, FetchError> {
    if tick % 2 == 0 {
        Ok(Usage {
            minutes_used: 312,
            minutes_quota: 600,
        })
    } else {
        Err(FetchError::Network("status.example.com".into()))
    }
}

fn render(state: &AsyncResult<Usage, FetchError>) -> String {
    state.clone().resolve(
        || "usage: —".to_string(),
        || "usage: loading…".to_string(),
        |u| format!("usage: {} of {} minutes", u.minutes_used, u.minutes_quota),
        |e| format!("usage unavailable: {e}"),
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("status panel starting");

    // A request driven through its lifecycle, re-rendered on every write.
    let req = Request::<Usage, FetchError>::new();
    req.store()
        .subscribe(|state| println!("{}", render(state)));

    println!("{}", render(&req.state()));
    req.begin();
    req.finish(fake_fetch(2));

    req.begin();
    req.finish(fake_fetch(3).and_then(|u| {
        if u.minutes_quota == 0 {
            Err(FetchError::InvalidPayload("zero quota".into()))
        } else {
            Ok(u)
        }
    }));

    // The same states arriving as a raw flag product from a fetch layer.
    let refreshing = FetchFlags {
        data: Some(Usage {
            minutes_used: 480,
            minutes_quota: 600,
        }),
        error: None::<FetchError>,
        is_loading: true,
    };
    println!("{}", render(&refreshing.into_async()));

    Ok(())
}
