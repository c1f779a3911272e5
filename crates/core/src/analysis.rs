//! Website compatibility report and code-generation plan types.
//!
//! These are the payloads produced by the analysis service. The report is
//! stored verbatim in `apps.ai_analysis`, so the serialized field names are
//! part of the persisted format and use camelCase.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Minimum number of recommendations a well-formed report carries.
pub const MIN_RECOMMENDATIONS: usize = 3;
/// Maximum number of recommendations a well-formed report carries.
pub const MAX_RECOMMENDATIONS: usize = 5;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Content classification of an analyzed site.
///
/// The first eight variants are the labels the analysis model is asked to
/// choose from. `Website` and `WebsiteProject` only appear in fallback
/// reports and in the fixed report returned for uploaded projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "E-commerce")]
    ECommerce,
    Blog,
    Portfolio,
    Business,
    Educational,
    News,
    Social,
    Other,
    Website,
    #[serde(rename = "Website Project")]
    WebsiteProject,
}

/// Rough size class of the generated app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimatedSize {
    Small,
    Medium,
    Large,
}

/// Structural features detected on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStructure {
    pub has_navigation: bool,
    pub has_footer: bool,
    pub has_images: bool,
    pub has_videos: bool,
    pub has_forms: bool,
}

/// Compatibility report for converting a website into a mobile app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub compatible: bool,
    pub content_type: ContentType,
    pub mobile_optimized: bool,
    pub estimated_size: EstimatedSize,
    pub recommendations: Vec<String>,
    pub structure: SiteStructure,
}

impl AnalysisReport {
    /// The fixed report returned whenever the analysis provider cannot
    /// produce a usable answer.
    pub fn fallback() -> Self {
        Self {
            compatible: true,
            content_type: ContentType::Website,
            mobile_optimized: false,
            estimated_size: EstimatedSize::Medium,
            recommendations: vec![
                "Add responsive design elements".to_string(),
                "Optimize images for mobile".to_string(),
                "Simplify navigation structure".to_string(),
                "Improve loading performance".to_string(),
            ],
            structure: SiteStructure {
                has_navigation: true,
                has_footer: true,
                has_images: true,
                has_videos: false,
                has_forms: true,
            },
        }
    }

    /// Check that a provider-produced report is well formed.
    ///
    /// A report must carry between [`MIN_RECOMMENDATIONS`] and
    /// [`MAX_RECOMMENDATIONS`] non-blank recommendations.
    pub fn validate(&self) -> Result<(), CoreError> {
        let count = self.recommendations.len();
        if !(MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&count) {
            return Err(CoreError::Validation(format!(
                "Expected {MIN_RECOMMENDATIONS}-{MAX_RECOMMENDATIONS} recommendations, got {count}"
            )));
        }
        if self.recommendations.iter().any(|r| r.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Recommendations must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary returned for an uploaded project archive.
///
/// Archives are not inspected, so this is always the same fixed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub compatible: bool,
    pub content_type: ContentType,
    pub mobile_optimized: bool,
    pub estimated_size: EstimatedSize,
    pub recommendations: Vec<String>,
}

impl ProjectAnalysis {
    pub fn uploaded_project() -> Self {
        Self {
            compatible: true,
            content_type: ContentType::WebsiteProject,
            mobile_optimized: true,
            estimated_size: EstimatedSize::Medium,
            recommendations: vec![
                "Consider optimizing images".to_string(),
                "Add responsive design".to_string(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Code-generation plan
// ---------------------------------------------------------------------------

/// Plan describing what the simulated code generator would produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePlan {
    pub success: bool,
    pub code_structure: Vec<String>,
    pub optimizations: Vec<String>,
    /// Estimated build time in minutes.
    pub estimated_build_time: u32,
}

impl CodePlan {
    /// The fixed plan used when the provider is unavailable.
    pub fn fallback() -> Self {
        let files = [
            "MainActivity.java",
            "WebViewActivity.java",
            "SplashActivity.java",
            "NavigationHelper.java",
            "OfflineManager.java",
            "AndroidManifest.xml",
            "activity_main.xml",
            "styles.xml",
            "strings.xml",
            "build.gradle",
            "ProguardRules.pro",
        ];
        let optimizations = [
            "WebView caching enabled",
            "Image compression applied",
            "JavaScript optimization",
            "Network request batching",
            "Memory usage optimization",
        ];
        Self {
            success: true,
            code_structure: files.iter().map(|s| s.to_string()).collect(),
            optimizations: optimizations.iter().map(|s| s.to_string()).collect(),
            estimated_build_time: 240,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
