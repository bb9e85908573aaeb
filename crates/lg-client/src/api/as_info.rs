//! AS registry endpoint.

use crate::LookingGlassClient;
use lg_core::{AsInfo, Result};

/// AS information lookups on one router
pub struct AsInfoApi<'a> {
    client: &'a LookingGlassClient,
    router: &'a str,
}

impl<'a> AsInfoApi<'a> {
    pub(crate) const fn new(client: &'a LookingGlassClient, router: &'a str) -> Self {
        Self { client, router }
    }

    /// Registry information for an AS.
    ///
    /// The backend does not echo the AS number, so it is filled in here.
    pub async fn lookup(&self, asn: u32) -> Result<AsInfo> {
        let asn_text = asn.to_string();
        let mut info: AsInfo = self
            .client
            .get_result(self.router, "v1/as_info", &[("asn", &asn_text)])
            .await?;
        info.as_number = asn;
        Ok(info)
    }
}
