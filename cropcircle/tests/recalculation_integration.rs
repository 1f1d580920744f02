//! Full recalculation passes driven from a configuration file.

use std::fs;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use cropcircle::clock::FixedClock;
use cropcircle::config::ConfigFile;
use cropcircle::service::Recalculator;
use cropcircle::sighting::{SightingReport, ValidationError, World};
use cropcircle::store::{MemorySightingStore, PublishedDistributions};
use tempfile::TempDir;

const CONFIG: &str = "\
[tracker]
location_count = 4
period_secs = 900
lag_rate = 0
lag_cap_secs = 0

[retention]
enabled = true
reset_weekday = wed
reset_time = 11:30

[worlds]
min = 300
max = 310
";

/// Friday 2024-03-08, two days after the Wednesday reset.
fn friday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap()
}

struct Harness {
    _dir: TempDir,
    config: ConfigFile,
    store: Arc<MemorySightingStore>,
    published: Arc<PublishedDistributions>,
    clock: Arc<FixedClock>,
    recalculator: Recalculator,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(&path, CONFIG).unwrap();
    let config = ConfigFile::load_from(&path).unwrap();

    let store = Arc::new(MemorySightingStore::new());
    let published = Arc::new(PublishedDistributions::new());
    let clock = Arc::new(FixedClock::new(friday()));
    let recalculator = Recalculator::new(
        config.tracker_config().unwrap(),
        store.clone(),
        store.clone(),
        published.clone(),
    )
    .with_clock(clock.clone())
    .with_retention(config.retention_policy());

    Harness {
        _dir: dir,
        config,
        store,
        published,
        clock,
        recalculator,
    }
}

impl Harness {
    fn report(
        &self,
        world: i64,
        location: i64,
        observed_at: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let ring = self.recalculator.config().geometry();
        self.store
            .record(
                SightingReport::new(world, location),
                observed_at,
                &self.config.world_bounds(),
                &ring,
            )
            .map(|_| ())
    }
}

#[test]
fn reports_outside_the_configured_range_are_rejected() {
    let h = harness();
    assert!(h.report(305, 3, friday()).is_ok());
    assert!(matches!(
        h.report(310, 0, friday()),
        Err(ValidationError::InvalidWorld { .. })
    ));
    assert!(matches!(
        h.report(305, 4, friday()),
        Err(ValidationError::InvalidLocation { .. })
    ));
    assert_eq!(h.store.len(), 1);
}

#[test]
fn pass_publishes_expires_and_discards() {
    let h = harness();
    // Before Wednesday's reset: expired regardless of consistency.
    h.report(301, 0, friday() - Duration::days(3)).unwrap();
    // World 302: a fresh sighting and an older contradicting one.
    h.report(302, 0, friday()).unwrap();
    h.report(302, 2, friday() - Duration::seconds(60)).unwrap();
    // World 303: two agreeing sightings, [1350, 2250) and [1500, 2400).
    h.report(303, 1, friday() - Duration::seconds(450)).unwrap();
    h.report(303, 1, friday() - Duration::seconds(600)).unwrap();

    let report = h.recalculator.run_pass().unwrap();
    assert_eq!(report.now, friday());
    assert_eq!(report.sightings_expired, 1);
    assert_eq!(report.worlds_published, vec![World(302), World(303)]);
    assert_eq!(report.stale_sightings.len(), 1);
    assert_eq!(h.store.len(), 3);

    let snapshot = serde_json::to_string(&h.published.snapshot()).unwrap();
    assert_eq!(snapshot, r#"{"302":{"0":1.0},"303":{"1":0.4,"2":0.6}}"#);
}

#[test]
fn estimates_follow_the_clock_and_vanish_with_their_sightings() {
    let h = harness();
    h.report(305, 3, friday()).unwrap();
    h.recalculator.run_pass().unwrap();
    assert_eq!(
        h.published.get(World(305)).unwrap().distribution.most_likely(),
        Some((3, 1.0))
    );

    // Half a period later the rotation may have moved on.
    h.clock.advance(Duration::seconds(450));
    h.recalculator.run_pass().unwrap();
    let estimate = h.published.get(World(305)).unwrap();
    assert_eq!(estimate.version, 2);
    assert!((estimate.distribution.probability(3) - 0.5).abs() < 1e-9);
    assert!((estimate.distribution.probability(0) - 0.5).abs() < 1e-9);

    // The next weekly reset expires the sighting and clears the world.
    h.clock.set(Utc.with_ymd_and_hms(2024, 3, 13, 11, 31, 0).unwrap());
    let report = h.recalculator.run_pass().unwrap();
    assert_eq!(report.sightings_expired, 1);
    assert_eq!(report.worlds_cleared, vec![World(305)]);
    assert!(h.published.is_empty());
}
