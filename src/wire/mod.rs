//! Wire schema of the remote tax service and the codec between it and the
//! local model.

pub mod codec;
pub mod dates;
pub mod model;
pub mod results;

pub use codec::{decode_adjust_tax, decode_get_tax, encode_adjust_tax, encode_get_tax};
pub use dates::WireDate;
pub use model::*;
pub use results::{decode_base_only, decode_get_tax_history};
