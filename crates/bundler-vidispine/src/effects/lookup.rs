use tracing::info;

use super::client::HttpClient;
use super::transport::Transport;
use crate::data::{ApiRequest, FileDocument};
use crate::error::{Error, Result};

/// Look up a file's metadata with `GET /API/storage/{storage_id}/file/{file_id}`.
///
/// # Errors
///
/// - [`Error::LookupFailed`] if the request fails
/// - [`Error::DecodeFailed`] if the response is not a `FileDocument`
pub fn fetch_descriptor<C: HttpClient>(
    transport: &Transport<C>,
    storage_id: &str,
    file_id: &str,
) -> Result<FileDocument> {
    let request = ApiRequest::get(format!("/API/storage/{storage_id}/file/{file_id}"))
        .header("Accept", "application/xml");

    let body = transport
        .request(&request)
        .map_err(|source| Error::LookupFailed {
            storage_id: storage_id.to_string(),
            file_id: file_id.to_string(),
            source: Box::new(source),
        })?;

    let document = FileDocument::from_xml(&body)?;
    info!(
        server = %transport.config().host,
        file_id,
        storage_id,
        path = %document.path,
        size = document.size,
        state = %document.state,
        "found file"
    );
    Ok(document)
}
