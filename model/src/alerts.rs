use std::collections::{BTreeMap, VecDeque};

use geom::{Duration, Time};
use serde::{Deserialize, Serialize};

use fleet::JourneyID;

use crate::{AlertPolicy, SimConfig};

const MAX_HISTORY: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    Arrived,
    LowBattery,
    Delayed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JourneyEvent {
    pub journey: JourneyID,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub journey: JourneyID,
    pub kind: AlertKind,
    pub message: String,
    pub shown_at: Time,
    pub expires_at: Time,
}

impl AlertKind {
    pub fn describe(self) -> &'static str {
        match self {
            AlertKind::Arrived => "arrived",
            AlertKind::LowBattery => "low battery",
            AlertKind::Delayed => "delayed",
        }
    }
}

/// Holds at most one visible banner, applies the de-duplication policy, and keeps a short history
/// of everything shown.
pub struct NotificationCenter {
    policy: AlertPolicy,
    display_for: Duration,
    banner: Option<Notification>,
    // Per-journey record of when each alert was last shown. Only used by PerJourney.
    last_shown: BTreeMap<(JourneyID, AlertKind), Time>,
    history: VecDeque<Notification>,
}

impl NotificationCenter {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            policy: config.alert_policy,
            display_for: config.notification_duration(),
            banner: None,
            last_shown: BTreeMap::new(),
            history: VecDeque::new(),
        }
    }

    pub fn expire(&mut self, now: Time) {
        if let Some(ref banner) = self.banner {
            if now >= banner.expires_at {
                debug!("Dismissing {:?} notification", banner.kind);
                self.banner = None;
            }
        }
    }

    /// Returns the notifications actually shown, in order. Events are considered in the order the
    /// simulation raised them, so within one tick, an earlier journey's banner can suppress a later
    /// one's under `AlertPolicy::GlobalBanner`.
    pub fn publish(&mut self, events: Vec<JourneyEvent>, now: Time) -> Vec<Notification> {
        self.expire(now);

        let mut shown = Vec::new();
        for ev in events {
            if !self.should_show(&ev, now) {
                debug!(
                    "Suppressing {} alert for {:?}",
                    ev.kind.describe(),
                    ev.journey
                );
                continue;
            }

            let notification = Notification {
                journey: ev.journey,
                kind: ev.kind,
                message: ev.message,
                shown_at: now,
                expires_at: now + self.display_for,
            };
            info!("Notification: {}", notification.message);
            self.last_shown.insert((ev.journey, ev.kind), now);
            self.banner = Some(notification.clone());
            self.history.push_back(notification.clone());
            if self.history.len() > MAX_HISTORY {
                self.history.pop_front();
            }
            shown.push(notification);
        }
        shown
    }

    fn should_show(&self, ev: &JourneyEvent, now: Time) -> bool {
        match self.policy {
            AlertPolicy::GlobalBanner => ev.kind == AlertKind::Arrived || self.banner.is_none(),
            AlertPolicy::PerJourney { cooldown_seconds } => {
                match self.last_shown.get(&(ev.journey, ev.kind)) {
                    Some(last) => now - *last >= Duration::seconds(cooldown_seconds),
                    None => true,
                }
            }
        }
    }

    pub fn banner(&self) -> Option<&Notification> {
        self.banner.as_ref()
    }

    pub fn history(&self) -> impl Iterator<Item = &Notification> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.banner = None;
        self.last_shown.clear();
        self.history.clear();
    }
}
