#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use daily_field::prelude::{ExclusionZone, LabelItem};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// `count` labels of varying length; every `priority_every`-th one is prioritized.
pub fn make_items(count: usize, priority_every: usize) -> Vec<LabelItem> {
    (0..count)
        .map(|i| {
            let title = "x".repeat(6 + (i * 7) % 24);
            LabelItem::new(format!("item-{i}"), title)
                .with_priority(priority_every > 0 && i % priority_every == 0)
        })
        .collect()
}

/// Corner block plus central disc, as used by the field page.
pub fn site_zones() -> Vec<ExclusionZone> {
    vec![
        ExclusionZone::top_left_corner(35.0, 14.0),
        ExclusionZone::circle([50.0, 50.0], 26.0),
    ]
}

pub fn make_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("work-{i}")).collect()
}
