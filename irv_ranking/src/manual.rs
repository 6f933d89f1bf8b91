/*!

This is the long-form manual for `irv_ranking` and `irvrank`.

## What is computed

A single instant-runoff count only names a winner. `irvrank` repeats the count
to rank every candidate:

1. All the candidates that have not been placed yet run a regular
   instant-runoff count. The weakest candidate is eliminated until the
   strongest one holds more than half of **all** the ballots (blank ballots
   count too).
2. That candidate takes the next place. If the count goes down to a single
   candidate who still has no majority, this candidate is *ineligible*: it is
   reported separately and takes no place.
3. The next count starts again from all the remaining candidates. The
   eliminations of the previous count are forgotten.

### Strength of a candidate

For every candidate, the program counts how many ballots rank it first, second,
and so on. Candidates are compared on these counts, first choices first: the
one with fewer first choices is weaker; with equal first choices, the one with
fewer second choices is weaker, and so on.

When two candidates have exactly the same counts, the order is still made
total (by looking at the ballots one by one, then at the names) but this order
has no electoral meaning. If the two *strongest* candidates have the same
counts, this is an unbreakable tie: the program asks which candidate to
eliminate.

## Input formats

### `tsv` (default)

The first line is the list of candidate names, separated by tabs. Every other
line is a ballot: one number per candidate, separated by spaces or tabs. `0`
means that the voter did not rank this candidate. Other numbers are
preferences: the smallest number is the favourite. Numbers do not need to
follow each other, but the same number may not be used twice on one ballot.

```text
Alice	Bob	Charlie
1 2 3
1 3 2
2 1 3
3 1 2
2 3 1
```

Empty lines are ignored.

### `xlsx`

The same layout in an Excel workbook: candidate names in the first row, one
ballot per row below. Empty cells are abstentions. The first worksheet is
used unless `--excel-worksheet-name` is given.

## Modes

* automatic (default): eliminations are done by the program. You are only
  asked when there is an unbreakable tie.
* manual: pass any second argument (`irvrank votes.tsv manual`). The table of
  counts is printed before every elimination and you choose the candidate to
  eliminate by its number.

## Configuration

All the options can be given on the command line. A JSON file can also be
passed with `--config`:

```json
{
  "outputSettings": {
    "contestName": "Board election",
    "contestDate": "2024-05-01",
    "outputFile": "summary.json"
  },
  "voteFileSource": {
    "filePath": "votes.tsv",
    "provider": "tsv"
  },
  "manualMode": false
}
```

Paths are relative to the configuration file. The command line overrides the
file.

The summary written with `--out` contains the ranking, the ineligible
candidates and every elimination of every round, with the counts that led to
it. `--reference` compares this summary with a previous one and fails if they
differ.

 */
