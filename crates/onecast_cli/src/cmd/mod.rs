/// JSON cast command.
pub mod cast;
/// Name resolution command.
pub mod resolve;
/// Schema inspection command.
pub mod schema;

mod util;
