mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::{Checkbox, FieldError, FormBanner, Input, Label, Select, Textarea};

mod toast;
pub use toast::{use_toast, ToastKind, ToastProvider, Toasts};
