use std::io;

use crate::error::TranslateError;

/// Maps a failed run to a sysexits-style exit code.
pub fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(err) = err.downcast_ref::<TranslateError>() {
        return match err {
            TranslateError::Validation(_) => exitcode::CONFIG,
            TranslateError::RateLimited(_) => exitcode::TEMPFAIL,
            TranslateError::BadRequest(_) | TranslateError::InvalidReply(_) => exitcode::DATAERR,
            TranslateError::NoResult(_) => exitcode::UNAVAILABLE,
            TranslateError::Unknown(_) => exitcode::SOFTWARE,
        };
    }

    if let Some(err) = err.downcast_ref::<io::Error>() {
        return match err.kind() {
            io::ErrorKind::NotFound => exitcode::NOINPUT,
            _ => exitcode::IOERR,
        };
    }

    exitcode::DATAERR
}
