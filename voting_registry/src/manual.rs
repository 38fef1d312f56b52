/*!

This is the long-form manual for `voting_registry` and `pollbooth`.

## Operations

| Operation | Checks (in order) |
|---|---|
| `register_voter(id, name)` | the id is not already a voter |
| `register_candidate(id, name)` | the id is a voter, the name matches the voter's name exactly, the id is not already a candidate |
| `cast_vote(voter_id, candidate_id)` | the voter exists, the candidate exists, the voter has not voted yet |

The first failing check is reported and nothing is modified.

## Messages

Success messages:

* `Voter {name} registered successfully.`
* `Candidate {name} registered successfully.`
* `Vote cast successfully by {voter} for {candidate}.`

Rejections:

* `Voter ID {id} already exists.`
* `Invalid Voter ID: {id}. Only registered voters can be candidates.`
* `Voter ID {id} and name '{name}' do not match the registered voter details.`
* `Candidate ID {id} already exists.`
* `Voter ID {id} not found.`
* `Candidate ID {id} not found.`
* `Voter {name} has already voted.`

Each accepted ballot appends `Voter {voter} voted for {candidate}.` to the log.

## Results

The results list every candidate with its number of votes, ordered by candidate id.
Two candidates that happen to share a name are listed separately.

## Running `pollbooth`

```bash
pollbooth --bind 127.0.0.1:5000
```

Without other options, the registry is seeded with the built-in roll of 79 voters, 5 of which are candidates.
Other rolls can be given with `--input`:

* `json`: `{"voters": ["Alice", "Bob"], "candidates": [1]}`. Voters are numbered from 1 in order.
* `csv`: a header row, then one `id,name` row per voter.

`--candidates` replaces the candidates of the roll, and `--empty` starts without any voter.
All the options can also be given in a JSON file passed with `--config`:

```json
{
  "bind": "0.0.0.0:8080",
  "roll": { "provider": "csv", "filePath": "voters.csv" },
  "candidates": [1, 2]
}
```

The file path of the roll is relative to the directory of the configuration file.

## Pages

* `/` landing page
* `/register_voter`, `/register_candidate`, `/cast_vote`: forms (GET) and their submission (POST)
* `/results`, `/logs`: tally and audit log
* `/api/results`, `/api/logs`: the same in JSON

Everything lives in memory and is lost when the process stops.
*/
