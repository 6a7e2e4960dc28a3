//! Page bodies. Navigation is left to the caller through event handlers.

mod guide_list;
pub use guide_list::GuideListView;

mod guide_editor;
pub use guide_editor::GuideEditorView;

mod guide_detail;
pub use guide_detail::GuideDetailView;

mod public_guides;
pub use public_guides::PublicGuidesView;

mod allotment;
pub use allotment::AllotmentView;

mod profile;
pub use profile::ProfileView;

mod preferences;
pub use preferences::PreferencesView;
