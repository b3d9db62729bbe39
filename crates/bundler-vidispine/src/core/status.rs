use bytes::Bytes;

use crate::error::Error;

/// What to do with a response.
#[derive(Debug)]
pub enum Outcome {
    /// Hand the body to the caller.
    Success(Bytes),
    /// Server temporarily unavailable; try the same request again.
    Retry { status: u16, body: Bytes },
    /// Surface the error without retrying.
    Failure(Error),
}

fn body_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// Map a status code and body onto an [`Outcome`].
///
/// | status     | outcome                    |
/// |------------|----------------------------|
/// | 200, 206   | success, body as-is        |
/// | 201        | success, empty body        |
/// | 400        | `BadRequest`               |
/// | 403        | `Forbidden`                |
/// | 502, 503   | retry                      |
/// | 500, 504   | `ServerError`              |
/// | anything else | `UnexpectedStatus`      |
pub fn classify(status: u16, body: Bytes) -> Outcome {
    match status {
        200 | 206 => Outcome::Success(body),
        201 => Outcome::Success(Bytes::new()),
        400 => Outcome::Failure(Error::BadRequest {
            body: body_text(&body),
        }),
        403 => Outcome::Failure(Error::Forbidden {
            body: body_text(&body),
        }),
        502 | 503 => Outcome::Retry { status, body },
        500 | 504 => Outcome::Failure(Error::ServerError {
            status,
            body: body_text(&body),
        }),
        _ => Outcome::Failure(Error::UnexpectedStatus {
            status,
            body: body_text(&body),
        }),
    }
}
