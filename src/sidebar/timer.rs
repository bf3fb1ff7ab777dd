use std::fmt;
use std::time::SystemTime;

use serde::Serialize;

use crate::engine::state::PlayerState;

pub const EMPTY_FARM_IMAGE: &str = "/img/items/farm2_sm.png";
pub const FALLBACK_IMAGE: &str = "/img/items/item.png";

/// Remaining time until a crop is ready, rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Countdown {
    Minutes(u64),
    /// Used once the remaining time reaches 90 minutes.
    Hours(u64),
    Ready,
}

impl Countdown {
    pub fn until(deadline: SystemTime, now: SystemTime) -> Self {
        let remaining = match deadline.duration_since(now) {
            Ok(d) if !d.is_zero() => d,
            _ => return Countdown::Ready,
        };
        let minutes = remaining.as_millis().div_ceil(60_000) as u64;
        if minutes >= 90 {
            Countdown::Hours(minutes.div_ceil(60))
        } else {
            Countdown::Minutes(minutes)
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Countdown::Ready)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Minutes(m) => write!(f, "{}m", m),
            Countdown::Hours(h) => write!(f, "{}h", h),
            Countdown::Ready => write!(f, "READY"),
        }
    }
}

/// The "next resource ready" indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CropTimer {
    Empty,
    Pending { image: String, countdown: Countdown },
}

impl CropTimer {
    pub fn image(&self) -> &str {
        match self {
            CropTimer::Empty => EMPTY_FARM_IMAGE,
            CropTimer::Pending { image, .. } => image,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CropTimer::Pending { countdown, .. } if countdown.is_ready())
    }

    pub fn label(&self) -> String {
        match self {
            CropTimer::Empty => "Empty".to_string(),
            CropTimer::Pending { countdown, .. } => countdown.to_string(),
        }
    }
}

/// The soonest crop deadline across all plots.
pub fn soonest_crop(player: &PlayerState, now: SystemTime) -> CropTimer {
    let soonest = player.crop_times.iter().min_by_key(|(_, &time)| time);
    match soonest {
        None => CropTimer::Empty,
        Some((slot, &deadline)) => CropTimer::Pending {
            image: player
                .crop_images
                .get(slot)
                .cloned()
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
            countdown: Countdown::until(deadline, now),
        },
    }
}
