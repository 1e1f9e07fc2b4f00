mod cold_start;
mod emergency;
mod recovery;
mod wifi_toggle;
