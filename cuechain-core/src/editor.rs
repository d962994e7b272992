//! Command layer for one chain editing session
//!
//! [`ChainEditor`] owns the chain and the ephemeral session state around it
//! (selection, drag, clipboard, inline rename) and exposes every logical
//! operation as its own method, so buttons, context menus and keyboard
//! shortcuts can all call the same thing.
//!
//! Every command either commits a new chain or leaves all state untouched.
//! Rejected edits are logged and returned to the caller; they never
//! half-apply. After a commit the selection and drag state are pruned of
//! ids that no longer exist.

use tracing::{debug, warn};

use crate::clipboard::{self, ClipboardBuffer};
use crate::config::EditorSettings;
use crate::drag_drop::{DragSession, DropConfig, DropTarget};
use crate::error::{ChainError, ChainResult};
use crate::group;
use crate::models::{Chain, ChainPayload, Item, ItemId};
use crate::registry::DefinitionRegistry;
use crate::selection::{self, ClickMode, SelectionState};
use crate::tracing::span_names;
use crate::tree::{
    ItemPath, delete_at_safely, find_item, find_path, find_paths, insert_at, top_most_paths,
    validate_chain,
};
use crate::view::{RowContext, RowVisibility, RowView, build_rows};

/// One interactive editing session over a chain.
#[derive(Debug, Clone)]
pub struct ChainEditor<P> {
    chain: Chain<P>,
    selection: SelectionState,
    drag: DragSession,
    clipboard: ClipboardBuffer<P>,
    renaming: Option<ItemId>,
    settings: EditorSettings,
    drop_config: DropConfig,
}

impl<P: Clone> ChainEditor<P> {
    /// Opens a session with default settings.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `DepthExceeded` if the chain is malformed.
    pub fn new(chain: Chain<P>) -> ChainResult<Self> {
        Self::with_settings(chain, EditorSettings::default())
    }

    /// Opens a session with the given settings.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `DepthExceeded` if the chain is malformed.
    pub fn with_settings(chain: Chain<P>, settings: EditorSettings) -> ChainResult<Self> {
        validate_chain(&chain)?;
        Ok(Self {
            chain,
            selection: SelectionState::new(),
            drag: DragSession::Idle,
            clipboard: ClipboardBuffer::new(),
            renaming: None,
            drop_config: settings.drop_config(),
            settings,
        })
    }

    /// The current chain
    pub fn chain(&self) -> &Chain<P> {
        &self.chain
    }

    /// Ends the session, returning the chain
    pub fn into_chain(self) -> Chain<P> {
        self.chain
    }

    /// The current selection
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The drag session
    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// The clipboard
    pub fn clipboard(&self) -> &ClipboardBuffer<P> {
        &self.clipboard
    }

    /// Item currently being renamed
    pub fn renaming(&self) -> Option<ItemId> {
        self.renaming
    }

    /// Active settings
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Replaces the settings.
    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.drop_config = settings.drop_config();
        self.settings = settings;
    }

    /// Swaps in a different chain and resets the session state.
    ///
    /// The clipboard survives; its contents are detached copies.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `DepthExceeded` if the chain is malformed;
    /// the session is left unchanged.
    pub fn replace_chain(&mut self, chain: Chain<P>) -> ChainResult<()> {
        validate_chain(&chain)?;
        self.chain = chain;
        self.selection.clear();
        self.drag.cancel();
        self.renaming = None;
        Ok(())
    }

    // Selection

    /// Applies a click with the given modifier semantics.
    pub fn click(&mut self, id: ItemId, mode: ClickMode) {
        self.selection = selection::apply_click(&self.chain, &self.selection, id, mode);
    }

    /// Selects exactly `ids`, anchored on the last one.
    ///
    /// Repeated ids count once; ids missing from the chain are dropped.
    pub fn select_ids(&mut self, ids: &[ItemId]) {
        let selection =
            SelectionState::with_ids(ids.iter().copied().collect(), ids.last().copied());
        self.selection = selection.prune(&self.chain);
    }

    /// Selects every item, groups included.
    pub fn select_all(&mut self) {
        let anchor = self.selection.last_selected_id();
        self.selection = SelectionState::with_ids(selection::select_all(&self.chain), anchor);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Clipboard

    /// Copies the selection to the clipboard, returning how many subtrees
    /// were copied. An empty selection leaves the clipboard as it was.
    pub fn copy_selected(&mut self) -> usize {
        let buffer = clipboard::copy(&self.chain, self.selection.selected_ids());
        let copied = buffer.len();
        if copied > 0 {
            self.clipboard = buffer;
        }
        copied
    }

    /// Moves the selection to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` if nothing selected is in the chain.
    pub fn cut_selected(&mut self) -> ChainResult<usize> {
        let (next, buffer) = clipboard::cut(&self.chain, self.selection.selected_ids());
        if buffer.is_empty() {
            return Err(report("cut", ChainError::EmptySelection));
        }
        let cut = buffer.len();
        self.commit("cut", Ok(next))?;
        self.clipboard = buffer;
        Ok(cut)
    }

    /// Pastes the clipboard and selects the pasted items.
    ///
    /// Lands after the selection anchor when that is a root item and
    /// `paste_after_selection` is on, otherwise at the end of the chain.
    ///
    /// # Errors
    ///
    /// Returns `DepthExceeded` if a buffered subtree is too deep.
    pub fn paste(&mut self) -> ChainResult<Vec<ItemId>> {
        if self.clipboard.is_empty() {
            return Ok(Vec::new());
        }
        let _span = crate::trace_operation!(
            span_names::CLIPBOARD_PASTE,
            item_count = self.clipboard.len()
        )
        .entered();

        let after_id = self
            .settings
            .clipboard
            .paste_after_selection
            .then(|| self.selection.last_selected_id())
            .flatten();
        let (next, pasted) = clipboard::paste(&self.chain, &self.clipboard, after_id)
            .map_err(|err| report("paste", err))?;
        self.commit("paste", Ok(next))?;
        self.select_created(&pasted);
        Ok(pasted)
    }

    /// Duplicates the selection in place and selects the copies.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` or `DepthExceeded`.
    pub fn duplicate_selected(&mut self) -> ChainResult<Vec<ItemId>> {
        let (next, created) = clipboard::duplicate(&self.chain, self.selection.selected_ids())
            .map_err(|err| report("duplicate", err))?;
        self.commit("duplicate", Ok(next))?;
        self.select_created(&created);
        Ok(created)
    }

    // Structure

    /// Deletes every selected item (with its subtree).
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` if nothing selected is in the chain.
    pub fn delete_selected(&mut self) -> ChainResult<usize> {
        let _span = crate::trace_operation!(
            span_names::SELECTION_DELETE,
            item_count = self.selection.selection_count()
        )
        .entered();

        let paths: Vec<ItemPath> = find_paths(&self.chain, self.selection.selected_ids())
            .into_values()
            .collect();
        if paths.is_empty() {
            return Err(report("delete", ChainError::EmptySelection));
        }
        let deleted = top_most_paths(&paths).len();
        let next = delete_at_safely(&self.chain, &paths);
        self.commit("delete", Ok(next))?;
        Ok(deleted)
    }

    /// Wraps the selection in a new group and selects it.
    ///
    /// The selection is normalized first, so a group selected together with
    /// its whole subtree is grouped as one item.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection`, `MixedParents` or `DepthExceeded`.
    pub fn group_selected(&mut self) -> ChainResult<ItemId> {
        let ids = selection::normalize(self.selection.selected_ids(), &self.chain);
        let _span =
            crate::trace_operation!(span_names::GROUP_CREATE, item_count = ids.len()).entered();

        let (next, group_id) =
            group::create_group(&self.chain, ids).map_err(|err| report("group", err))?;
        self.commit("group", Ok(next))?;
        self.selection = SelectionState::single(group_id);
        Ok(group_id)
    }

    /// Replaces a group with its children.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` or `NotAGroup`.
    pub fn ungroup(&mut self, group_id: ItemId) -> ChainResult<()> {
        let _span =
            crate::trace_operation!(span_names::GROUP_UNGROUP, item_id = %group_id).entered();
        let result = group::ungroup(&self.chain, group_id);
        self.commit("ungroup", result)
    }

    /// Flips a group's collapsed flag.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` or `NotAGroup`.
    pub fn toggle_collapse(&mut self, group_id: ItemId) -> ChainResult<()> {
        let result = group::toggle_collapse(&self.chain, group_id);
        self.commit("toggle collapse", result)
    }

    /// Enables or disables an item.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound`.
    pub fn set_enabled(&mut self, id: ItemId, enabled: bool) -> ChainResult<()> {
        let result = group::set_enabled(&self.chain, id, enabled);
        self.commit("set enabled", result)
    }

    /// Shows the inline rename editor on a group.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` or `NotAGroup`.
    pub fn begin_rename(&mut self, group_id: ItemId) -> ChainResult<()> {
        match find_item(&self.chain, group_id) {
            None => Err(report("rename", ChainError::ItemNotFound(group_id))),
            Some(item) if !item.is_group() => {
                Err(report("rename", ChainError::NotAGroup(group_id)))
            }
            Some(_) => {
                self.renaming = Some(group_id);
                Ok(())
            }
        }
    }

    /// Hides the inline rename editor without renaming.
    pub fn cancel_rename(&mut self) {
        self.renaming = None;
    }

    /// Renames a group and closes the inline rename editor.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` or `NotAGroup`.
    pub fn rename(&mut self, group_id: ItemId, name: impl Into<String>) -> ChainResult<()> {
        let result = group::rename(&self.chain, group_id, name);
        self.commit("rename", result)?;
        if self.renaming == Some(group_id) {
            self.renaming = None;
        }
        Ok(())
    }

    /// Inserts a new item after `after_id`, or at the end of the chain.
    ///
    /// `after_id` may be at any depth; the item becomes its next sibling.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the item reuses an id already in the chain,
    /// or `DepthExceeded` if it would nest too deep.
    pub fn add_item(&mut self, item: Item<P>, after_id: Option<ItemId>) -> ChainResult<ItemId> {
        let id = item.id();
        let existing = selection::select_all(&self.chain);
        let mut reused = None;
        item.walk(&mut |node| {
            if reused.is_none() && existing.contains(&node.id()) {
                reused = Some(node.id());
            }
        });
        if let Some(reused) = reused {
            return Err(report("add", ChainError::DuplicateId(reused)));
        }

        let path = after_id
            .and_then(|after| find_path(&self.chain, after))
            .map_or_else(
                || ItemPath::root(self.chain.len()),
                |path| {
                    let index = path.last_index().unwrap_or(0);
                    path.with_last_index(index + 1)
                },
            );
        let result = insert_at(&self.chain, &path, item);
        self.commit("add", result)?;
        Ok(id)
    }

    // Drag and drop

    /// Starts dragging from `id`, adopting the drag's selection.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the item is not in the chain.
    pub fn begin_drag(&mut self, id: ItemId) -> ChainResult<()> {
        let selection = self
            .drag
            .start(&self.chain, &self.selection, id)
            .map_err(|err| report("drag", err))?;
        self.selection = selection;
        self.renaming = None;
        Ok(())
    }

    /// Updates the drop target from the pointer's fraction down the row.
    pub fn drag_over(&mut self, target_id: ItemId, pointer_fraction_y: f64) -> Option<DropTarget> {
        self.drag
            .drag_over(&self.chain, target_id, pointer_fraction_y, &self.drop_config)
    }

    /// The pointer left every row; a release now cancels.
    pub fn leave_drop_target(&mut self) {
        self.drag.leave_target();
    }

    /// Releases the drag, committing the move if there is a valid target.
    ///
    /// The drag ends either way. On success the moved items stay selected.
    ///
    /// # Errors
    ///
    /// Returns `NotDragging`, `NoDropTarget`, or any error from the move.
    pub fn release_drag(&mut self) -> ChainResult<()> {
        let result = self.drag.release(&self.chain);
        self.commit("drop", result)
    }

    /// Abandons the drag without touching the chain.
    pub fn cancel_drag(&mut self) {
        if self.drag.is_dragging() {
            debug!("Drag cancelled");
        }
        self.drag.cancel();
    }

    fn select_created(&mut self, created: &[ItemId]) {
        if let Some(&first) = created.first() {
            self.selection =
                SelectionState::with_ids(created.iter().copied().collect(), Some(first));
        }
    }

    fn commit(&mut self, operation: &'static str, result: ChainResult<Chain<P>>) -> ChainResult<()> {
        let next = result.map_err(|err| report(operation, err))?;
        assert_consistent(operation, &next);
        self.chain = next;
        self.selection = self.selection.prune(&self.chain);
        self.drag.prune(&self.chain);
        if self.renaming.is_some_and(|id| find_item(&self.chain, id).is_none()) {
            self.renaming = None;
        }
        debug!(operation, items = self.chain.len(), "Committed chain edit");
        Ok(())
    }
}

impl<P: ChainPayload> ChainEditor<P> {
    /// Row view models for the renderer.
    pub fn rows<R: DefinitionRegistry>(
        &self,
        registry: &R,
        visibility: RowVisibility,
    ) -> Vec<RowView> {
        build_rows(
            &self.chain,
            &RowContext {
                selection: &self.selection,
                drag: self.drag.state(),
                renaming: self.renaming,
                registry,
                visibility,
            },
        )
    }
}

/// Logs a failed command at a level matching its family.
fn report(operation: &'static str, err: ChainError) -> ChainError {
    if err.is_rejection() {
        warn!(operation, error = %err, "Edit rejected");
    } else {
        debug!(operation, error = %err, "Edit skipped");
    }
    err
}

/// Fails loudly if a committed chain breaks an invariant.
fn assert_consistent<P>(operation: &str, chain: &Chain<P>) {
    if let Err(violation) = validate_chain(chain) {
        tracing::error!(operation, error = %violation, "Chain invariant violated");
        panic!("{operation} produced an inconsistent chain: {violation}");
    }
}
