pub use crate::async_data::{AsyncData, AsyncResult};
pub use crate::fetch::FetchFlags;
pub use crate::option::{OptionExt, from_nullable};
pub use crate::result::ResultExt;
pub use crate::store::{Request, Store, SubId};
pub use crate::tag::{CaseTable, Cases, MatchError, Tag, TagFamily, Tagged};
