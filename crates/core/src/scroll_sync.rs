//! Scroll mirroring between panels.
//!
//! Panels register under a sync group per axis. A genuine scroll on one panel
//! is relayed to every other panel of the same group and axis as a
//! [`ScrollUpdate`]. The view layer applies those by assigning the panel's
//! scroll position, which makes the browser fire a scroll event on the
//! receiver. The receiver's recorded offset already matches, so that echo
//! is not broadcast again.
//!
//! A receiver that cannot reach the offset (already at its scroll limit)
//! reports the clamped position, or nothing at all when its position did not
//! change. A clamped report is relayed like any other scroll, which pulls
//! the group back to an offset every panel can show.

use std::collections::BTreeMap;

use scrubline_protocol::{Axis, PanelId, PanelScroll, ScrollUpdate, SyncGroupId};

#[derive(Debug, Clone)]
struct PanelEntry {
    group: SyncGroupId,
    offset: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSynchronizer {
    panels: BTreeMap<(PanelId, Axis), PanelEntry>,
}

impl ScrollSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `panel` for `axis` under `group`. Re-registering moves the
    /// panel to the new group and keeps its offset.
    pub fn register(&mut self, panel: PanelId, group: SyncGroupId, axis: Axis) {
        log::debug!("scroll sync: {panel} joins {group} ({axis})");
        self.panels
            .entry((panel, axis))
            .and_modify(|entry| entry.group = group.clone())
            .or_insert(PanelEntry {
                group,
                offset: 0,
            });
    }

    pub fn unregister(&mut self, panel: &PanelId, axis: Axis) -> bool {
        self.panels.remove(&(panel.clone(), axis)).is_some()
    }

    /// Last known offset of `panel` on `axis`.
    pub fn offset(&self, panel: &PanelId, axis: Axis) -> Option<i64> {
        self.panels
            .get(&(panel.clone(), axis))
            .map(|entry| entry.offset)
    }

    /// Handle a scroll signal from `panel`'s own element.
    ///
    /// Returns the offsets the view layer must assign to the panel's sync
    /// partners. Signals that match the recorded offset (echoes of a previous
    /// update) and unregistered panels produce nothing. Hosts may also report
    /// a panel's position read back after applying an update; an unchanged
    /// one is a no-op.
    pub fn on_scroll(&mut self, panel: &PanelId, axis: Axis, offset: i64) -> Vec<ScrollUpdate> {
        let offset = offset.max(0);
        let Some(entry) = self.panels.get_mut(&(panel.clone(), axis)) else {
            log::trace!("scroll sync: ignoring unregistered panel {panel} ({axis})");
            return Vec::new();
        };

        if entry.offset == offset {
            return Vec::new();
        }
        entry.offset = offset;
        let group = entry.group.clone();

        let mut updates = Vec::new();
        for ((other, other_axis), partner) in &mut self.panels {
            if other == panel || *other_axis != axis || partner.group != group {
                continue;
            }
            if partner.offset == offset {
                continue;
            }
            partner.offset = offset;
            updates.push(ScrollUpdate {
                panel: other.clone(),
                axis,
                offset,
            });
        }

        if !updates.is_empty() {
            log::debug!(
                "scroll sync: {panel} {axis} -> {offset}, mirrored to {} panel(s)",
                updates.len()
            );
        }
        updates
    }

    /// Current offsets of all registered panels, ordered by panel then axis.
    pub fn snapshot(&self) -> Vec<PanelScroll> {
        self.panels
            .iter()
            .map(|((panel, axis), entry)| PanelScroll {
                panel: panel.clone(),
                axis: *axis,
                offset: entry.offset,
            })
            .collect()
    }
}
