//! Typed access to the backend resources

use serde_json::Value;
use shared::Payload;
use shared::models::{
    AlertQuantityUpdate, Branch, BranchProduct, CompanySettings, CompanySettingsUpdate, Employee,
    PriceType, PriceUpdate, PriceUpdateRequest, ProductPrice,
};

use crate::client::HttpClient;
use crate::error::ClientResult;
use crate::resource::{Branches, Employees, PriceTypes, Resource};

/// Typed API over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct PosApi<C> {
    client: C,
}

impl<C: HttpClient> PosApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    // ========== Generic CRUD ==========

    pub async fn list<R: Resource>(&self) -> ClientResult<Vec<R::Item>> {
        let payload: Payload<Vec<R::Item>> = self.client.get(R::PATH).await?;
        Ok(payload.into_inner())
    }

    pub async fn get<R: Resource>(&self, id: i64) -> ClientResult<R::Item> {
        let payload: Payload<R::Item> = self.client.get(&format!("{}/{}", R::PATH, id)).await?;
        Ok(payload.into_inner())
    }

    pub async fn create<R: Resource>(&self, body: &R::Create) -> ClientResult<R::Item> {
        let payload: Payload<R::Item> = self.client.post(R::PATH, body).await?;
        Ok(payload.into_inner())
    }

    pub async fn update<R: Resource>(&self, id: i64, body: &R::Update) -> ClientResult<R::Item> {
        let payload: Payload<R::Item> = self
            .client
            .put(&format!("{}/{}", R::PATH, id), body)
            .await?;
        Ok(payload.into_inner())
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> ClientResult<()> {
        let _: Value = self.client.delete(&format!("{}/{}", R::PATH, id)).await?;
        Ok(())
    }

    // ========== Pricing ==========

    pub async fn branches(&self) -> ClientResult<Vec<Branch>> {
        self.list::<Branches>().await
    }

    pub async fn price_types(&self) -> ClientResult<Vec<PriceType>> {
        self.list::<PriceTypes>().await
    }

    pub async fn employee(&self, id: i64) -> ClientResult<Employee> {
        self.get::<Employees>(id).await
    }

    /// `GET /branch-products?branch_id=`
    pub async fn branch_products(&self, branch_id: i64) -> ClientResult<Vec<BranchProduct>> {
        let payload: Payload<Vec<BranchProduct>> = self
            .client
            .get(&format!("branch-products?branch_id={}", branch_id))
            .await?;
        Ok(payload.into_inner())
    }

    /// `GET /load-product-prices?product_id=&branch_id=`
    pub async fn product_prices(
        &self,
        product_id: i64,
        branch_id: i64,
    ) -> ClientResult<Vec<ProductPrice>> {
        let payload: Payload<Vec<ProductPrice>> = self
            .client
            .get(&format!(
                "load-product-prices?product_id={}&branch_id={}",
                product_id, branch_id
            ))
            .await?;
        Ok(payload.into_inner())
    }

    /// `POST /update-product-price` with all records in one body.
    ///
    /// Returns the server's confirmation message, if any.
    pub async fn update_product_prices(
        &self,
        prices: Vec<PriceUpdate>,
    ) -> ClientResult<Option<String>> {
        let body = PriceUpdateRequest { prices };
        let response: Value = self.client.post("update-product-price", &body).await?;
        Ok(response
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// `PUT /branch-products/{id}`
    pub async fn update_alert_quantity(
        &self,
        product_id: i64,
        alert_quantity: i64,
    ) -> ClientResult<()> {
        let _: Value = self
            .client
            .put(
                &format!("branch-products/{}", product_id),
                &AlertQuantityUpdate { alert_quantity },
            )
            .await?;
        Ok(())
    }

    // ========== Settings ==========

    pub async fn settings(&self) -> ClientResult<CompanySettings> {
        let payload: Payload<CompanySettings> = self.client.get("settings").await?;
        Ok(payload.into_inner())
    }

    pub async fn update_settings(
        &self,
        update: &CompanySettingsUpdate,
    ) -> ClientResult<CompanySettings> {
        let payload: Payload<CompanySettings> = self.client.put("settings", update).await?;
        Ok(payload.into_inner())
    }
}
