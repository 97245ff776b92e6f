mod campaign_test;
mod helpers;
mod resource_test;
mod round_trip_test;
