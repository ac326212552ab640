use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use survey_builder::{
    DashboardStats, Page, QuestionAnalytics, QuestionType, QuestionTypeRegistry, ResponseRecord,
    Survey, SurveyId, SurveyRecord, SurveyStore, SurveySummary,
};

use crate::error::ResponseExt;
use crate::pages::{PageLoader, QuestionAnalyticsPages, ResponsePages};
use crate::{ClientConfig, ClientError};

/// Client for the survey persistence and analytics APIs.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    url: String,
    client: reqwest::Client,
    registry: QuestionTypeRegistry,
    page_size: u32,
}

impl ApiClient {
    /// Create a client from its configuration.
    ///
    /// Question metadata is decoded against the standard question types
    /// until [`refresh_question_types`](Self::refresh_question_types) loads
    /// the server's list.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::Config("SURVEY_API_TOKEN is not a valid header".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            url: config.base_url.trim_end_matches('/').to_string(),
            client,
            registry: QuestionTypeRegistry::standard(),
            page_size: config.page_size,
        })
    }

    /// Use the given registry to decode question metadata.
    pub fn with_registry(mut self, registry: QuestionTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The registry used to decode question metadata.
    pub fn registry(&self) -> &QuestionTypeRegistry {
        &self.registry
    }

    /// The configured listing page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch the server's question types and decode with them from now on.
    pub async fn refresh_question_types(&mut self) -> Result<&QuestionTypeRegistry, ClientError> {
        let types = self.question_types().await?;
        self.registry = QuestionTypeRegistry::new(types);
        Ok(&self.registry)
    }

    /// Aggregated numbers for the dashboard.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        let url = self.endpoint("Dashboard");
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?.map_client_error().await?;
        decode(response, "Dashboard").await
    }

    /// One page of per-question analytics for a survey.
    pub async fn question_analytics_page(
        &self,
        survey: SurveyId,
        page: u32,
        page_size: u32,
    ) -> Result<Page<QuestionAnalytics>, ClientError> {
        let url = self.endpoint(&format!("ViewSurveyDetails/{survey}/QuestionAnalytics"));
        self.get_page(&url, page, page_size).await
    }

    /// One page of individual responses to a survey.
    pub async fn responses_page(
        &self,
        survey: SurveyId,
        page: u32,
        page_size: u32,
    ) -> Result<Page<ResponseRecord>, ClientError> {
        let url = self.endpoint(&format!("ViewSurveyDetails/{survey}/Responses"));
        self.get_page(&url, page, page_size).await
    }

    /// Upload the rendered QR code image of a survey's public link.
    pub async fn upload_qr(&self, survey: SurveyId, png: Vec<u8>) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("Surveys/{survey}/Qr"));
        log::debug!("PUT {url} ({} bytes)", png.len());
        self.client
            .put(&url)
            .header(CONTENT_TYPE, "image/png")
            .body(png)
            .send()
            .await?
            .map_client_error()
            .await?;
        Ok(())
    }

    /// A loader paging through a survey's question analytics.
    pub fn analytics_loader(
        &self,
        survey: SurveyId,
    ) -> PageLoader<QuestionAnalyticsPages, QuestionAnalytics> {
        PageLoader::new(QuestionAnalyticsPages::new(self.clone(), survey), self.page_size)
    }

    /// A loader paging through a survey's responses.
    pub fn responses_loader(&self, survey: SurveyId) -> PageLoader<ResponsePages, ResponseRecord> {
        PageLoader::new(ResponsePages::new(self.clone(), survey), self.page_size)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Page<T>, ClientError> {
        log::debug!("GET {url} page {page} (size {page_size})");
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await?
            .map_client_error()
            .await?;
        decode(response, url).await
    }
}

impl SurveyStore for ApiClient {
    type Error = ClientError;

    async fn list_surveys(&self) -> Result<Vec<SurveySummary>, Self::Error> {
        let url = self.endpoint("Surveys");
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?.map_client_error().await?;
        decode(response, "Surveys").await
    }

    async fn load_survey(&self, id: SurveyId) -> Result<Option<Survey>, Self::Error> {
        let url = self.endpoint(&format!("Surveys/{id}"));
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("survey {id} not found");
            return Ok(None);
        }
        let record: SurveyRecord = decode(response.map_client_error().await?, &url).await?;
        Ok(Some(Survey::from_record(record, &self.registry)))
    }

    async fn create_survey(&self, survey: &Survey) -> Result<Survey, Self::Error> {
        let url = self.endpoint("Surveys");
        let record = survey.to_record()?;
        log::debug!("POST {url} ({} questions)", record.questions.len());
        let response = self
            .client
            .post(&url)
            .json(&record)
            .send()
            .await?
            .map_client_error()
            .await?;
        let created: SurveyRecord = decode(response, "Surveys").await?;
        Ok(Survey::from_record(created, &self.registry))
    }

    async fn update_survey(&self, id: SurveyId, survey: &Survey) -> Result<(), Self::Error> {
        let url = self.endpoint(&format!("Surveys/{id}"));
        let mut record = survey.to_record()?;
        record.id = Some(id);
        log::debug!("PUT {url} ({} questions)", record.questions.len());
        self.client
            .put(&url)
            .json(&record)
            .send()
            .await?
            .map_client_error()
            .await?;
        Ok(())
    }

    async fn delete_survey(&self, id: SurveyId) -> Result<(), Self::Error> {
        let url = self.endpoint(&format!("Surveys/{id}"));
        log::debug!("DELETE {url}");
        let response = self.client.delete(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("survey {id} was already gone");
            return Ok(());
        }
        response.map_client_error().await?;
        Ok(())
    }

    async fn question_types(&self) -> Result<Vec<QuestionType>, Self::Error> {
        let url = self.endpoint("QuestionTypes");
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?.map_client_error().await?;
        decode(response, "QuestionTypes").await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
}
