// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use url::Url;

pub(crate) trait AppendPathSegments {
    fn append_path_segments<I>(&mut self, segments: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>;

    fn with_path_segments<I>(&self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>;
}

impl AppendPathSegments for Url {
    fn append_path_segments<I>(&mut self, segments: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        // Endpoints are validated as base URLs when the client is built, so this
        // only skips URLs that can never carry a path.
        if let Ok(mut path) = self.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
    }

    fn with_path_segments<I>(&self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.clone();
        url.append_path_segments(segments);
        url
    }
}
