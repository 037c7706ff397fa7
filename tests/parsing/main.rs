mod broken;
mod documents;
mod samples;
