//! AWS Rekognition `CompareFaces` backend.

use super::{
    BoundingBox, CompareOptions, ComparedFace, ComparisonResult, FaceComparator, FaceMatch,
    ImageQuality, Landmark, Pose, SourceFace,
};
use crate::core::credentials::Credentials;
use crate::error::{ServiceError, ServiceFaultKind};
use crate::events::{CompareEvent, Event, EventSender};
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_rekognition::config::{Credentials as AwsCredentials, Region};
use aws_sdk_rekognition::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_rekognition::operation::compare_faces::CompareFacesOutput;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types as aws;

const PROVIDER_NAME: &str = "face-compare";

/// Compares faces with Amazon Rekognition.
///
/// Stateless: a new client is built from the given credentials on every
/// call, since credentials may change between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RekognitionComparator;

impl RekognitionComparator {
    pub fn new() -> Self {
        Self
    }

    async fn client(credentials: &Credentials) -> aws_sdk_rekognition::Client {
        let provider = AwsCredentials::new(
            credentials.access_key(),
            credentials.secret_key(),
            None,
            None,
            PROVIDER_NAME,
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region().to_string()))
            .credentials_provider(provider)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        aws_sdk_rekognition::Client::new(&shared_config)
    }
}

impl FaceComparator for RekognitionComparator {
    async fn compare(
        &self,
        credentials: &Credentials,
        source: &[u8],
        target: &[u8],
        options: &CompareOptions,
        events: &EventSender,
    ) -> Result<ComparisonResult, ServiceError> {
        let client = Self::client(credentials).await;
        tracing::info!(region = credentials.region(), "Rekognition client created");
        events.send(Event::Compare(CompareEvent::ClientCreated {
            region: credentials.region().to_string(),
        }));

        let source_image = aws::Image::builder()
            .bytes(Blob::new(source.to_vec()))
            .build();
        let target_image = aws::Image::builder()
            .bytes(Blob::new(target.to_vec()))
            .build();

        events.send(Event::Compare(CompareEvent::Submitted {
            source_bytes: source.len(),
            target_bytes: target.len(),
        }));

        let response = client
            .compare_faces()
            .source_image(source_image)
            .target_image(target_image)
            .set_similarity_threshold(options.similarity_threshold)
            .send()
            .await;

        match response {
            Ok(output) => {
                let result = convert_output(output);
                events.send(Event::Compare(CompareEvent::Completed {
                    match_count: result.match_count(),
                }));
                Ok(result)
            }
            Err(err) => {
                let error = service_error(&err);
                tracing::error!(kind = %error.kind, "CompareFaces failed: {}", error.message);
                events.send(Event::Compare(CompareEvent::Failed {
                    message: error.message.clone(),
                }));
                Err(error)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Amazon Rekognition"
    }
}

/// Classify an SDK failure and keep the service's own `code: message`.
///
/// Failures without service metadata (dispatch, timeout, construction)
/// fall back to the SDK's error chain.
fn service_error<E, R>(err: &SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let kind = match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => ServiceFaultKind::Network,
        _ => ServiceFaultKind::from_code(err.code()),
    };
    let message = match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => DisplayErrorContext(err).to_string(),
    };
    ServiceError::new(kind, message)
}

/// Copy the SDK response into the crate's own serializable model
pub(crate) fn convert_output(output: CompareFacesOutput) -> ComparisonResult {
    ComparisonResult {
        face_matches: output
            .face_matches
            .unwrap_or_default()
            .into_iter()
            .map(|m| FaceMatch {
                similarity: m.similarity.unwrap_or(0.0),
                face: m.face.map(convert_face).unwrap_or_default(),
            })
            .collect(),
        unmatched_faces: output
            .unmatched_faces
            .unwrap_or_default()
            .into_iter()
            .map(convert_face)
            .collect(),
        source_image_face: output.source_image_face.map(|face| SourceFace {
            bounding_box: face.bounding_box.map(convert_box),
            confidence: face.confidence,
        }),
        source_image_orientation_correction: output
            .source_image_orientation_correction
            .map(|o| o.as_str().to_string()),
        target_image_orientation_correction: output
            .target_image_orientation_correction
            .map(|o| o.as_str().to_string()),
    }
}

fn convert_face(face: aws::ComparedFace) -> ComparedFace {
    ComparedFace {
        bounding_box: face.bounding_box.map(convert_box),
        confidence: face.confidence,
        landmarks: face
            .landmarks
            .unwrap_or_default()
            .into_iter()
            .map(|l| Landmark {
                kind: l
                    .r#type
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default(),
                x: l.x.unwrap_or_default(),
                y: l.y.unwrap_or_default(),
            })
            .collect(),
        pose: face.pose.map(|p| Pose {
            roll: p.roll.unwrap_or_default(),
            yaw: p.yaw.unwrap_or_default(),
            pitch: p.pitch.unwrap_or_default(),
        }),
        quality: face.quality.map(|q| ImageQuality {
            brightness: q.brightness.unwrap_or_default(),
            sharpness: q.sharpness.unwrap_or_default(),
        }),
    }
}

fn convert_box(b: aws::BoundingBox) -> BoundingBox {
    BoundingBox {
        width: b.width.unwrap_or_default(),
        height: b.height.unwrap_or_default(),
        left: b.left.unwrap_or_default(),
        top: b.top.unwrap_or_default(),
    }
}
