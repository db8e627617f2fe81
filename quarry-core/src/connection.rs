use crate::{ConnectionConfig, Driver, Executor, Result};
use std::{borrow::Cow, future::Future};

pub trait Connection: Executor {
    /// Open a connection to the given url, `<provider>://...`.
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;

    /// Open a connection described by `config`.
    fn connect_with(config: &ConnectionConfig) -> impl Future<Output = Result<Self>> + Send {
        let url = config.to_url(<Self::Driver as Driver>::NAME);
        async move { Self::connect(url?.into()).await }
    }
}
