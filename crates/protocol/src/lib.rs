pub mod call_tree;
pub mod commands;
pub mod input;
pub mod request;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use call_tree::{
    CallFrame, CallTreeModel, CallTreeNode, Category, Location, SourceLocation, ValueUnit,
};
pub use commands::{Fill, RenderCommand};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent, WheelEvent};
pub use request::OpenDocument;
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Color, Hsl, Point, Rect, Viewport};
