use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting goal sync...");

        // Extract
        tracing::info!("Extracting Strava activity totals...");
        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted week {:.1} km ({} runs), year {:.1} km",
            snapshot.week.distance_km,
            snapshot.runs_this_week,
            snapshot.year.distance_km
        );

        // Transform
        tracing::info!("Comparing against goals...");
        let summary = self.pipeline.transform(snapshot).await?;
        tracing::info!(
            "Weekly {:.1}/{} km ({:.1}%), yearly {:.1}/{} km ({:.1}%)",
            summary.weekly.distance_km,
            summary.weekly.goal_km,
            summary.weekly.percent,
            summary.yearly.distance_km,
            summary.yearly.goal_km,
            summary.yearly.percent
        );

        // Load
        tracing::info!("Publishing to TRMNL...");
        let outcome = self.pipeline.load(summary).await?;
        tracing::info!("Finished in {:?}", started.elapsed());

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ActivitySnapshot, ActivityTotal, GoalSummary, Goals, Period,
    };
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakePipeline {
        loads: Arc<AtomicUsize>,
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for FakePipeline {
        async fn extract(&self) -> Result<ActivitySnapshot> {
            if self.fail_extract {
                return Err(EtlError::auth("no token"));
            }
            Ok(ActivitySnapshot {
                week: ActivityTotal {
                    period: Period::Week,
                    distance_km: 10.0,
                },
                year: ActivityTotal {
                    period: Period::Year,
                    distance_km: 500.0,
                },
                runs_this_week: 3,
            })
        }

        async fn transform(&self, data: ActivitySnapshot) -> Result<GoalSummary> {
            Ok(crate::core::aggregator::summarize(
                &data,
                &Goals {
                    weekly: 30.0,
                    yearly: 1500.0,
                },
            ))
        }

        async fn load(&self, result: GoalSummary) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}", result.weekly.percent))
        }
    }

    #[tokio::test]
    async fn test_runs_all_three_stages() {
        let loads = Arc::new(AtomicUsize::new(0));
        let engine = EtlEngine::new(FakePipeline {
            loads: loads.clone(),
            fail_extract: false,
        });

        assert_eq!(engine.run().await.unwrap(), "33.3");
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extract_failure_stops_before_load() {
        let loads = Arc::new(AtomicUsize::new(0));
        let engine = EtlEngine::new(FakePipeline {
            loads: loads.clone(),
            fail_extract: true,
        });

        assert!(engine.run().await.is_err());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }
}
