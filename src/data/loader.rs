use futures::future::try_join;
use log::info;
use tokio_util::sync::CancellationToken;

use super::{InitialData, LoadError, RestaurantSource};

/// Loads restaurants and stats concurrently. Both must succeed; the first
/// failure wins and the other request is dropped.
pub async fn load_initial(
    source: &dyn RestaurantSource,
    cancel: &CancellationToken,
) -> Result<InitialData, LoadError> {
    info!("Loading restaurants and stats from {} source", source.name());
    let (restaurants, stats) = try_join(source.restaurants(cancel), source.stats(cancel)).await?;
    info!("Loaded {} restaurants", restaurants.len());
    Ok(InitialData { restaurants, stats })
}
