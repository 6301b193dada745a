//! Waste sorting: drop every item into the bin of its category.

use serde::Serialize;

use super::{GameModule, ModuleContext, Step};
use crate::catalog::{Bin, Catalog, SortItem};
use crate::generators;
use crate::types::{
    ConfigError, GameAction, GameKind, SORT_CORRECT_POINTS, SORT_WRONG_POINTS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSlot {
    pub item: SortItem,
    /// Bin index once the item has been sorted correctly
    pub placed_bin: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingGame {
    items: Vec<SortSlot>,
    bins: Vec<Bin>,
    mistakes: u32,
}

impl SortingGame {
    pub fn items(&self) -> &[SortSlot] {
        &self.items
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Items still waiting for a bin
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|s| s.placed_bin.is_none()).count()
    }
}

impl GameModule for SortingGame {
    const KIND: GameKind = GameKind::Sorting;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        let items = generators::sorting_pool(catalog, ctx.rng())
            .into_iter()
            .map(|item| SortSlot {
                item,
                placed_bin: None,
            })
            .collect();
        Ok(Self {
            items,
            bins: catalog.bins.clone(),
            mistakes: 0,
        })
    }

    fn handle(&mut self, action: &GameAction, _ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::AssignItemToBin { item, bin } = *action else {
            return Step::IGNORED;
        };
        let Some(target) = self.bins.get(bin) else {
            return Step::IGNORED;
        };
        let Some(slot) = self.items.get_mut(item) else {
            return Step::IGNORED;
        };
        if slot.placed_bin.is_some() {
            return Step::IGNORED;
        }

        if slot.item.category != target.category {
            // Wrong bin: the item goes back to the pool
            self.mistakes += 1;
            return Step::applied(SORT_WRONG_POINTS);
        }

        slot.placed_bin = Some(bin);
        if self.remaining() == 0 {
            Step::win(SORT_CORRECT_POINTS)
        } else {
            Step::applied(SORT_CORRECT_POINTS)
        }
    }
}
