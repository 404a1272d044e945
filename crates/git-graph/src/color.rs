//! Color assignment, independent of lane numbers.
//!
//! A color stays with a lineage for as long as the lineage's column segment
//! is open. Once released it can only go to a lineage starting more than
//! `gap` rows later, so two unrelated lines drawn next to each other never
//! share a color.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// Held by this many open lineages. More than one only happens once a
    /// palette cap forces sharing.
    InUse(usize),
    Released { last_used_row: usize },
}

/// Color slots of one layout run.
#[derive(Debug, Clone)]
pub struct ColorTable {
    slots: Vec<SlotState>,
    gap: usize,
    max_colors: Option<usize>,
    lineages: usize,
}

impl ColorTable {
    /// Create a table enforcing `gap` rows between release and reuse.
    ///
    /// A `max_colors` of zero cannot hold any lineage and is treated as one.
    pub fn new(gap: usize, max_colors: Option<usize>) -> Self {
        Self {
            slots: Vec::new(),
            gap,
            max_colors: max_colors.map(|max| max.max(1)),
            lineages: 0,
        }
    }

    /// Number of distinct colors handed out.
    pub fn color_count(&self) -> usize {
        self.slots.len()
    }

    /// Pick a color for a lineage whose segment starts at `start_row`.
    pub fn acquire(&mut self, start_row: usize) -> usize {
        self.lineages += 1;
        let gap = self.gap;
        let eligible = self.slots.iter().position(|slot| match *slot {
            SlotState::Released { last_used_row } => {
                last_used_row.saturating_add(gap) < start_row
            }
            SlotState::InUse(_) => false,
        });

        let color = match eligible {
            Some(color) => color,
            None if self.max_colors.map_or(true, |max| self.slots.len() < max) => {
                self.slots.push(SlotState::Released { last_used_row: 0 });
                self.slots.len() - 1
            }
            None => self.forced_slot(),
        };

        self.slots[color] = match self.slots[color] {
            SlotState::InUse(holders) => SlotState::InUse(holders + 1),
            SlotState::Released { .. } => SlotState::InUse(1),
        };
        log::debug!("color {color} acquired for lineage starting at row {start_row}");
        color
    }

    /// The palette is full: take the longest-released slot, or share one.
    fn forced_slot(&self) -> usize {
        let oldest = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(color, slot)| match *slot {
                SlotState::Released { last_used_row } => Some((last_used_row, color)),
                SlotState::InUse(_) => None,
            })
            .min();
        match oldest {
            Some((_, color)) => color,
            None => (self.lineages - 1) % self.slots.len(),
        }
    }

    /// A lineage holding `color` ended at `row`.
    pub fn release(&mut self, color: usize, row: usize) {
        let Some(slot) = self.slots.get_mut(color) else {
            return;
        };
        *slot = match *slot {
            SlotState::InUse(holders) if holders > 1 => SlotState::InUse(holders - 1),
            SlotState::InUse(_) => SlotState::Released { last_used_row: row },
            SlotState::Released { last_used_row } => SlotState::Released {
                last_used_row: last_used_row.max(row),
            },
        };
    }
}
