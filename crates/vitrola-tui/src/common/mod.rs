pub mod input;
pub mod layout;
pub mod task;
pub mod text;
pub mod toast;

pub use input::{Form, TextField};
pub use layout::{
    ACCENT, InputHint, MUTED, calculate_overlay_area, field_line, hint_line, inner_area,
    render_hints, render_overlay_container,
};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::truncate_with_ellipsis;
pub use toast::{Toast, ToastKind, ToastQueue};
