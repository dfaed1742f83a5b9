//! Protocol Module
//!
//! Defines the text admin protocol spoken on the job server's port.
//!
//! ## Protocol Format
//!
//! One command per connection, newline terminated:
//! ```text
//! status | version | workers | maxqueue <function> [<size>] | shutdown [graceful]
//! ```
//!
//! ### Replies
//! - `ERR <code> <percent-encoded message>` on the first line: request rejected
//! - otherwise data lines, ended by `.`, a blank line, EOF or read timeout
//!
//! ### Layers
//! - `command`: request lines
//! - `codec`:   framing (line reads, terminators, error lines)
//! - `decode`:  per-command line grammars

mod command;
mod response;
mod codec;
mod decode;

pub use command::{validate_function_name, Command, CommandType};
pub use response::{
    Failure, FunctionStatus, Outcome, RawResponse, ServerError, WorkerInfo, OK_LINE,
};
pub use codec::{
    encode_command, parse_error_line, percent_decode, read_line, read_response, trim_line,
    write_command, LineRead, ERROR_PREFIX, MAX_LINE_LEN, TERMINATOR,
};
pub use decode::{
    decode_ok, decode_status, decode_version, decode_workers, parse_status_line,
    parse_worker_line, StatusMap, VERSION_PREFIX_LEN,
};
